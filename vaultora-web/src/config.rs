//! Server configuration.
//!
//! Loaded from the TOML file named by `VAULTORA_CONFIG` (default
//! `./vaultora.toml`). A missing file means defaults. `PORT` and
//! `DATABASE_URL` override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vaultora_core::error::{CoreError, CoreResult};

pub const ENV_CONFIG_PATH: &str = "VAULTORA_CONFIG";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
const DEFAULT_CONFIG_PATH: &str = "vaultora.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Actix worker threads
    pub workers: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            workers: num_cpus::get(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Any URL sea-orm understands (sqlite, postgres, mysql)
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://vaultora.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, `RUST_LOG` takes precedence
    pub level: String,
    pub format: LogFormat,
    /// Daily-rolling log files go here; stdout when unset
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            directory: None,
        }
    }
}

impl ServerConfig {
    /// Load from `VAULTORA_CONFIG` (or `./vaultora.toml`) and apply environment overrides.
    pub fn load() -> CoreResult<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigError(e.to_string()))
    }

    /// Apply `PORT` / `DATABASE_URL` from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CoreResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            self.server.port = port
                .parse()
                .map_err(|e| CoreError::ConfigError(format!("Invalid {ENV_PORT} {port:?}: {e}")))?;
        }
        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|v| !v.is_empty()) {
            self.database.url = url;
        }
        Ok(())
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.server.workers == 0 {
            return Err(CoreError::ConfigError(
                "server.workers must be greater than 0".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(CoreError::ConfigError(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.url.is_empty() {
            return Err(CoreError::ConfigError("database.url is empty".to_string()));
        }
        Ok(())
    }
}
