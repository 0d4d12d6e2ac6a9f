//! 本地缓存抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// 凭证列表快照所在的缓存键
pub const CREDENTIALS_CACHE_KEY: &str = "passwords";

/// 本地缓存 Trait
///
/// 进程本地、跨会话持久化的键值存储，值为序列化后的字符串。
///
/// 平台实现:
/// - 桌面/CLI: `JsonFileCache`（每个键一个文件）
/// - 测试/临时会话: `MemoryCache`
#[async_trait]
pub trait LocalCache: Send + Sync {
    /// 读取键对应的值
    ///
    /// # Returns
    /// * `Ok(Some(value))` - 快照存在
    /// * `Ok(None)` - 快照不存在
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// 写入键值（覆盖旧值）
    ///
    /// # Arguments
    /// * `key` - 缓存键
    /// * `value` - 序列化后的值
    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// 删除键，键不存在时视为成功
    async fn remove(&self, key: &str) -> CoreResult<()>;
}
