//! Remote credential service abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::CredentialRecord;

/// Client-side view of the remote credential service
///
/// Platform implementation:
/// - `HttpCredentialRemote` (reqwest, talks to `vaultora-web`)
///
/// Non-success statuses and transport failures are reported as
/// `CoreError::UnexpectedStatus` / `CoreError::NetworkError`.
#[async_trait]
pub trait CredentialRemote: Send + Sync {
    /// Fetch every stored record
    async fn list_all(&self) -> CoreResult<Vec<CredentialRecord>>;

    /// Insert one record as-is
    async fn create(&self, record: &CredentialRecord) -> CoreResult<()>;

    /// Replace the record with `record.id`
    async fn update(&self, record: &CredentialRecord) -> CoreResult<()>;

    /// Delete the record with this id
    async fn delete_by_id(&self, id: &str) -> CoreResult<()>;
}
