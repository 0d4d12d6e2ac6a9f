//! Platform-agnostic client bootstrap for Vaultora.
//!
//! Provides `AppState` (the loaded client controller plus its config) and
//! `AppStateBuilder` (adapter injection with config-derived defaults).

pub mod adapters;
pub mod config;

use std::sync::Arc;
use std::time::Duration;

use vaultora_core::error::{CoreError, CoreResult};
use vaultora_core::services::{ClientContext, CredentialStoreClient, LoadOutcome, SyncPolicy};
use vaultora_core::traits::{Clipboard, CredentialRemote, LocalCache};

use crate::adapters::{HttpCredentialRemote, JsonFileCache, Osc52Clipboard};
pub use crate::config::ClientConfig;

/// Client application state.
///
/// Every frontend constructs this once at startup via `AppStateBuilder`.
pub struct AppState {
    pub config: ClientConfig,
    /// Credential list controller (owns list and presentation state)
    pub client: CredentialStoreClient,
}

impl AppState {
    /// Run the startup sequence: load the credential list from cache or remote.
    ///
    /// Load failures are recovered inside the client; the outcome is returned
    /// so the frontend can decide whether to show a banner.
    pub async fn run_startup(&mut self) -> LoadOutcome {
        log::debug!(
            "Starting client (cache: {}, service: {}, sync: {:?})",
            self.config.cache_dir.display(),
            self.config.service_url,
            self.client.policy()
        );
        self.client.load().await
    }
}

/// Builder for constructing `AppState`.
///
/// # Defaults (from `ClientConfig`)
/// - `local_cache`: `JsonFileCache` in `config.cache_dir`
/// - `remote`: `HttpCredentialRemote` at `config.service_url`
/// - `clipboard`: `Osc52Clipboard` on stdout
/// - `sync_policy`: `config.sync_policy`
pub struct AppStateBuilder {
    config: ClientConfig,
    local_cache: Option<Arc<dyn LocalCache>>,
    remote: Option<Arc<dyn CredentialRemote>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    sync_policy: Option<SyncPolicy>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            local_cache: None,
            remote: None,
            clipboard: None,
            sync_policy: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn local_cache(mut self, cache: Arc<dyn LocalCache>) -> Self {
        self.local_cache = Some(cache);
        self
    }

    #[must_use]
    pub fn remote(mut self, remote: Arc<dyn CredentialRemote>) -> Self {
        self.remote = Some(remote);
        self
    }

    #[must_use]
    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Override `config.sync_policy`
    #[must_use]
    pub fn sync_policy(mut self, policy: SyncPolicy) -> Self {
        self.sync_policy = Some(policy);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ConfigError` if the default remote cannot be created
    /// from `config.service_url`, or `CoreError::ValidationError` if the
    /// request timeout is zero.
    pub fn build(self) -> CoreResult<AppState> {
        let config = self.config;
        if config.request_timeout_secs == 0 {
            return Err(CoreError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        let local_cache = self
            .local_cache
            .unwrap_or_else(|| Arc::new(JsonFileCache::new(config.cache_dir.clone())));
        let remote: Arc<dyn CredentialRemote> = match self.remote {
            Some(remote) => remote,
            None => Arc::new(HttpCredentialRemote::new(
                &config.service_url,
                Duration::from_secs(config.request_timeout_secs),
            )?),
        };
        let clipboard = self
            .clipboard
            .unwrap_or_else(|| Arc::new(Osc52Clipboard::stdout()));
        let policy = self.sync_policy.unwrap_or(config.sync_policy);

        let ctx = Arc::new(ClientContext::new(local_cache, remote, clipboard));
        log::debug!("Client state built with {policy:?} sync");

        Ok(AppState {
            config,
            client: CredentialStoreClient::new(ctx, policy),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
