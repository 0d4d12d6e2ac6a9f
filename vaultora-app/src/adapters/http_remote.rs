//! HTTP client for the Vaultora credential service.
//!
//! Routes:
//! - `GET /` list, `POST /` create
//! - `PUT /{id}` update, `DELETE /{id}` delete by id (404 when missing)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use vaultora_core::error::{CoreError, CoreResult};
use vaultora_core::traits::CredentialRemote;
use vaultora_core::types::CredentialRecord;

/// Remote credential service over HTTP
pub struct HttpCredentialRemote {
    client: Client,
    base_url: Url,
}

impl HttpCredentialRemote {
    /// Create a client for the service at `base_url`.
    ///
    /// A missing trailing slash is added so relative routes resolve under the base path.
    pub fn new(base_url: &str, timeout: Duration) -> CoreResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| CoreError::ConfigError(format!("Invalid service URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::ConfigError(format!(
                "Service URL cannot be used as a base: {base_url}"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<id>` with the id percent-encoded as a single path segment
    fn record_url(&self, id: &str) -> CoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CoreError::ConfigError(format!("Service URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Send the request and return status and body text.
    ///
    /// Only transport failures are errors here; status handling is up to the caller.
    async fn execute(
        request: RequestBuilder,
        method: &str,
        url: &Url,
    ) -> CoreResult<(StatusCode, String)> {
        log::debug!("{method} {url}");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CoreError::NetworkError(format!("{method} {url} timed out: {e}"))
            } else {
                CoreError::NetworkError(format!("{method} {url} failed: {e}"))
            }
        })?;

        let status = response.status();
        log::debug!("Response Status: {status}");

        // Bodies carry passwords, only their size is logged
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::NetworkError(format!("Failed to read response body: {e}")))?;
        log::debug!("Response Body: {} bytes", body.len());

        Ok((status, body))
    }

    /// Map a non-success status to an error. `not_found_id` turns 404 into `CredentialNotFound`.
    fn check_status(status: StatusCode, body: String, not_found_id: Option<&str>) -> CoreResult<()> {
        if status.is_success() {
            return Ok(());
        }
        if let (StatusCode::NOT_FOUND, Some(id)) = (status, not_found_id) {
            return Err(CoreError::CredentialNotFound(id.to_string()));
        }
        log::warn!("Credential service answered {status}");
        Err(CoreError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: Serialize + ?Sized + Sync>(
        &self,
        method: reqwest::Method,
        url: Url,
        payload: &T,
        not_found_id: Option<&str>,
    ) -> CoreResult<()> {
        let request = self.client.request(method.clone(), url.clone()).json(payload);
        let (status, body) = Self::execute(request, method.as_str(), &url).await?;
        Self::check_status(status, body, not_found_id)
    }
}

#[async_trait]
impl CredentialRemote for HttpCredentialRemote {
    async fn list_all(&self) -> CoreResult<Vec<CredentialRecord>> {
        let url = self.base_url.clone();
        let (status, body) = Self::execute(self.client.get(url.clone()), "GET", &url).await?;
        if !status.is_success() {
            return Self::check_status(status, body, None).map(|()| Vec::new());
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            CoreError::SerializationError(format!("Invalid credential list: {e}"))
        })
    }

    async fn create(&self, record: &CredentialRecord) -> CoreResult<()> {
        self.send_json(reqwest::Method::POST, self.base_url.clone(), record, None)
            .await
    }

    async fn update(&self, record: &CredentialRecord) -> CoreResult<()> {
        let url = self.record_url(&record.id)?;
        self.send_json(reqwest::Method::PUT, url, record, Some(&record.id))
            .await
    }

    async fn delete_by_id(&self, id: &str) -> CoreResult<()> {
        let url = self.record_url(id)?;
        let (status, body) =
            Self::execute(self.client.delete(url.clone()), "DELETE", &url).await?;
        Self::check_status(status, body, Some(id))
    }
}
