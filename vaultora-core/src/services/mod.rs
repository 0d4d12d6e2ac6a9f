//! 业务逻辑服务层

mod credential_service;
mod credential_store_client;

pub use credential_service::CredentialService;
pub use credential_store_client::{
    CredentialStoreClient, LoadOutcome, SyncPolicy, PASSWORD_MASK,
};

use std::sync::Arc;

use crate::traits::{Clipboard, CredentialRemote, LocalCache};

/// 客户端上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的缓存、远端与剪贴板实现。
pub struct ClientContext {
    /// 本地缓存
    local_cache: Arc<dyn LocalCache>,
    /// 远端凭证服务
    remote: Arc<dyn CredentialRemote>,
    /// 剪贴板
    clipboard: Arc<dyn Clipboard>,
}

impl ClientContext {
    /// 创建客户端上下文
    #[must_use]
    pub fn new(
        local_cache: Arc<dyn LocalCache>,
        remote: Arc<dyn CredentialRemote>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            local_cache,
            remote,
            clipboard,
        }
    }

    #[must_use]
    pub fn local_cache(&self) -> &Arc<dyn LocalCache> {
        &self.local_cache
    }

    #[must_use]
    pub fn remote(&self) -> &Arc<dyn CredentialRemote> {
        &self.remote
    }

    #[must_use]
    pub fn clipboard(&self) -> &Arc<dyn Clipboard> {
        &self.clipboard
    }
}
