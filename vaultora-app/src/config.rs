//! Client configuration.
//!
//! Read from `<config_dir>/vaultora/client.toml`; every field has a default so
//! a missing file is not an error. `VAULTORA_SERVICE_URL` and
//! `VAULTORA_CACHE_DIR` override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vaultora_core::error::{CoreError, CoreResult};
use vaultora_core::services::SyncPolicy;

const APP_DIR_NAME: &str = "vaultora";
const CONFIG_FILE_NAME: &str = "client.toml";

pub const ENV_SERVICE_URL: &str = "VAULTORA_SERVICE_URL";
pub const ENV_CACHE_DIR: &str = "VAULTORA_CACHE_DIR";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the credential service
    pub service_url: String,
    /// Directory holding the local cache files
    pub cache_dir: PathBuf,
    pub sync_policy: SyncPolicy,
    /// Per-request timeout for the remote service
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:3000/".to_string(),
            cache_dir: default_cache_dir(),
            sync_policy: SyncPolicy::default(),
            request_timeout_secs: 10,
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

impl ClientConfig {
    /// `<config_dir>/vaultora/client.toml`, if the platform has a config dir
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location and apply environment overrides.
    pub fn load() -> CoreResult<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        log::debug!("Loaded client config from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigError(e.to_string()))
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVICE_URL).filter(|v| !v.is_empty()) {
            self.service_url = url;
        }
        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|v| !v.is_empty()) {
            self.cache_dir = PathBuf::from(dir);
        }
    }
}
