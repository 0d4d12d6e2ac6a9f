//! File-backed local cache.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go to a sibling temp file
//! first and are renamed into place, so a crash never leaves a half-written
//! snapshot behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use vaultora_core::error::{CoreError, CoreResult};
use vaultora_core::traits::LocalCache;

const MAX_CACHE_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Local cache with one JSON file per key
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that backs `key`
    pub fn path_for(&self, key: &str) -> CoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(CoreError::StorageError(format!("Invalid cache key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl LocalCache for JsonFileCache {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let path = self.path_for(key)?;

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Cache file does not exist: {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read cache file metadata: {e}"
                )))
            }
        };

        if metadata.len() > MAX_CACHE_FILE_SIZE {
            return Err(CoreError::StorageError(format!(
                "Cache file too large: {} bytes (max: {MAX_CACHE_FILE_SIZE} bytes)",
                metadata.len()
            )));
        }

        tokio::fs::read_to_string(&path)
            .await
            .map(Some)
            .map_err(|e| CoreError::StorageError(format!("Failed to read cache file: {e}")))
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            CoreError::StorageError(format!(
                "Failed to create cache directory {}: {e}",
                self.dir.display()
            ))
        })?;

        tokio::fs::write(&tmp_path, value)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to write cache file: {e}")))?;

        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                log::warn!("Failed to remove {}: {cleanup}", tmp_path.display());
            }
            return Err(CoreError::StorageError(format!(
                "Failed to replace cache file: {e}"
            )));
        }

        log::debug!("Cache key {key} written ({} bytes)", value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::StorageError(format!(
                "Failed to remove cache file: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_maps_to_json_file() {
        let cache = JsonFileCache::new("/tmp/vaultora");
        assert_eq!(
            cache.path_for("passwords").unwrap(),
            PathBuf::from("/tmp/vaultora/passwords.json")
        );
    }

    #[test]
    fn rejects_path_like_keys() {
        let cache = JsonFileCache::new("/tmp/vaultora");
        for key in ["", "../etc/passwd", "a/b", ".hidden"] {
            assert!(cache.path_for(key).is_err(), "{key:?} should be rejected");
        }
    }
}
