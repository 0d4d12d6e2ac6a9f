//! 凭证集合服务（服务端）

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::traits::CredentialRepository;
use crate::types::{Acknowledgement, CredentialMatcher, CredentialRecord};

/// 凭证集合服务
///
/// 无认证、无服务端校验，记录按原样存储。
pub struct CredentialService {
    repository: Arc<dyn CredentialRepository>,
}

impl CredentialService {
    /// 创建凭证集合服务实例
    #[must_use]
    pub fn new(repository: Arc<dyn CredentialRepository>) -> Self {
        Self { repository }
    }

    /// 列出所有记录
    pub async fn list_all(&self) -> CoreResult<Vec<CredentialRecord>> {
        self.repository.find_all().await
    }

    /// 按原样插入一条记录，不检查 ID 是否重复
    pub async fn create(&self, record: &CredentialRecord) -> CoreResult<Acknowledgement> {
        self.repository.insert(record).await?;
        log::info!("Credential {} stored", record.id);
        Ok(Acknowledgement::ok())
    }

    /// 删除至多一条与匹配器完全匹配的记录
    ///
    /// 空匹配器删除最早的一条记录。无论是否真的删除了记录都返回成功确认。
    pub async fn delete_one(&self, matcher: &CredentialMatcher) -> CoreResult<Acknowledgement> {
        if matcher.has_unknown_fields() {
            log::debug!("Matcher has fields no record carries, nothing to delete");
        }

        let deleted = self.repository.delete_one(matcher).await?;
        log::info!("Delete by matcher removed {deleted} credential(s)");
        Ok(Acknowledgement::ok())
    }

    /// 按 ID 替换记录，路径中的 ID 优先于请求体中的 ID
    pub async fn update(&self, id: &str, record: CredentialRecord) -> CoreResult<Acknowledgement> {
        let record = CredentialRecord {
            id: id.to_string(),
            ..record
        };

        if self.repository.update(&record).await? {
            log::info!("Credential {id} updated");
            Ok(Acknowledgement::ok())
        } else {
            Err(CoreError::CredentialNotFound(id.to_string()))
        }
    }

    /// 按 ID 删除记录
    pub async fn delete_by_id(&self, id: &str) -> CoreResult<Acknowledgement> {
        let deleted = self
            .repository
            .delete_one(&CredentialMatcher::by_id(id))
            .await?;

        if deleted == 0 {
            return Err(CoreError::CredentialNotFound(id.to_string()));
        }
        log::info!("Credential {id} deleted");
        Ok(Acknowledgement::ok())
    }
}
