//! In-process local cache.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vaultora_core::error::CoreResult;
use vaultora_core::traits::LocalCache;

/// Local cache that lives only as long as the process
///
/// Used for throwaway sessions (`--ephemeral`) and in tests.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalCache for MemoryCache {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
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
