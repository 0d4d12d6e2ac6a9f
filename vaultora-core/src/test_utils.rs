//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ClientContext, CredentialService, CredentialStoreClient, SyncPolicy};
use crate::traits::{
    Clipboard, CredentialRemote, CredentialRepository, LocalCache, CREDENTIALS_CACHE_KEY,
};
use crate::types::{CredentialInput, CredentialMatcher, CredentialRecord};

// ===== MockLocalCache =====

pub struct MockLocalCache {
    entries: RwLock<HashMap<String, String>>,
    /// 如果 Some，set 时返回此错误（用于测试回滚路径）
    set_error: RwLock<Option<String>>,
    /// 如果 Some，get 时返回此错误
    get_error: RwLock<Option<String>>,
    set_calls: AtomicUsize,
}

impl MockLocalCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            set_error: RwLock::new(None),
            get_error: RwLock::new(None),
            set_calls: AtomicUsize::new(0),
        }
    }

    pub async fn set_set_error(&self, err: Option<String>) {
        *self.set_error.write().await = err;
    }

    pub async fn set_get_error(&self, err: Option<String>) {
        *self.get_error.write().await = err;
    }

    /// 直接写入原始快照（绕过 set 计数）
    pub async fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// 解析凭证快照
    pub async fn snapshot(&self) -> Option<Vec<CredentialRecord>> {
        let raw = self.raw(CREDENTIALS_CACHE_KEY).await?;
        serde_json::from_str(&raw).ok()
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocalCache for MockLocalCache {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        if let Some(ref msg) = *self.get_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.set_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

// ===== MockCredentialRemote =====

pub struct MockCredentialRemote {
    records: RwLock<Vec<CredentialRecord>>,
    /// 如果 Some，所有请求返回该状态码
    fail_status: RwLock<Option<u16>>,
    /// 调用记录，如 `list`、`create:<id>`、`update:<id>`、`delete:<id>`
    calls: RwLock<Vec<String>>,
}

impl MockCredentialRemote {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            fail_status: RwLock::new(None),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn seed(&self, records: Vec<CredentialRecord>) {
        *self.records.write().await = records;
    }

    pub async fn set_fail_status(&self, status: Option<u16>) {
        *self.fail_status.write().await = status;
    }

    pub async fn records(&self) -> Vec<CredentialRecord> {
        self.records.read().await.clone()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    async fn enter(&self, call: String) -> CoreResult<()> {
        self.calls.write().await.push(call);
        match *self.fail_status.read().await {
            Some(0) => Err(CoreError::NetworkError("connection refused".to_string())),
            Some(status) => Err(CoreError::UnexpectedStatus {
                status,
                body: String::new(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CredentialRemote for MockCredentialRemote {
    async fn list_all(&self) -> CoreResult<Vec<CredentialRecord>> {
        self.enter("list".to_string()).await?;
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, record: &CredentialRecord) -> CoreResult<()> {
        self.enter(format!("create:{}", record.id)).await?;
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &CredentialRecord) -> CoreResult<()> {
        self.enter(format!("update:{}", record.id)).await?;
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(CoreError::CredentialNotFound(record.id.clone())),
        }
    }

    async fn delete_by_id(&self, id: &str) -> CoreResult<()> {
        self.enter(format!("delete:{id}")).await?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(CoreError::CredentialNotFound(id.to_string()));
        }
        Ok(())
    }
}

// ===== MockClipboard =====

pub struct MockClipboard {
    content: RwLock<Option<String>>,
    fail: RwLock<bool>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self {
            content: RwLock::new(None),
            fail: RwLock::new(false),
        }
    }

    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn content(&self) -> Option<String> {
        self.content.read().await.clone()
    }
}

#[async_trait]
impl Clipboard for MockClipboard {
    async fn write_text(&self, text: &str) -> CoreResult<()> {
        if *self.fail.read().await {
            return Err(CoreError::ClipboardError("permission denied".to_string()));
        }
        *self.content.write().await = Some(text.to_string());
        Ok(())
    }
}

// ===== MockCredentialRepository =====

pub struct MockCredentialRepository {
    records: RwLock<Vec<CredentialRecord>>,
    /// 如果 Some，所有操作返回此错误
    error: RwLock<Option<String>>,
}

impl MockCredentialRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            error: RwLock::new(None),
        }
    }

    pub async fn set_error(&self, err: Option<String>) {
        *self.error.write().await = err;
    }

    pub async fn records(&self) -> Vec<CredentialRecord> {
        self.records.read().await.clone()
    }

    async fn check(&self) -> CoreResult<()> {
        match *self.error.read().await {
            Some(ref msg) => Err(CoreError::StorageError(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CredentialRepository for MockCredentialRepository {
    async fn find_all(&self) -> CoreResult<Vec<CredentialRecord>> {
        self.check().await?;
        Ok(self.records.read().await.clone())
    }

    async fn insert(&self, record: &CredentialRecord) -> CoreResult<()> {
        self.check().await?;
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &CredentialRecord) -> CoreResult<bool> {
        self.check().await?;
        let mut replaced = false;
        for slot in self.records.write().await.iter_mut().filter(|r| r.id == record.id) {
            *slot = record.clone();
            replaced = true;
        }
        Ok(replaced)
    }

    async fn delete_one(&self, matcher: &CredentialMatcher) -> CoreResult<u64> {
        self.check().await?;
        let mut records = self.records.write().await;
        Ok(match records.iter().position(|r| matcher.matches(r)) {
            Some(index) => {
                records.remove(index);
                1
            }
            None => 0,
        })
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `CredentialStoreClient`
pub fn create_test_client(
    policy: SyncPolicy,
) -> (
    CredentialStoreClient,
    Arc<MockLocalCache>,
    Arc<MockCredentialRemote>,
    Arc<MockClipboard>,
) {
    let cache = Arc::new(MockLocalCache::new());
    let remote = Arc::new(MockCredentialRemote::new());
    let clipboard = Arc::new(MockClipboard::new());

    let ctx = Arc::new(ClientContext::new(
        cache.clone(),
        remote.clone(),
        clipboard.clone(),
    ));

    (
        CredentialStoreClient::new(ctx, policy),
        cache,
        remote,
        clipboard,
    )
}

/// 创建测试用 `CredentialService`
pub fn create_test_credential_service() -> (CredentialService, Arc<MockCredentialRepository>) {
    let repository = Arc::new(MockCredentialRepository::new());
    (CredentialService::new(repository.clone()), repository)
}

/// 创建一条测试记录
pub fn test_record(id: &str, website: &str) -> CredentialRecord {
    CredentialRecord::with_id(
        id.to_string(),
        CredentialInput::new(website, format!("user@{website}"), "secret"),
    )
}
