//! Credential collection persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{CredentialMatcher, CredentialRecord};

/// Server-side credential collection
///
/// Platform implementation:
/// - Actix-Web: `DatabaseCredentialRepository` (`SeaORM`)
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Get all records
    async fn find_all(&self) -> CoreResult<Vec<CredentialRecord>>;

    /// Insert a record, replacing any existing record with the same id
    ///
    /// # Arguments
    /// * `record` - Record data, stored as-is
    async fn insert(&self, record: &CredentialRecord) -> CoreResult<()>;

    /// Replace an existing record
    ///
    /// # Returns
    /// * `Ok(true)` - a record with `record.id` existed and was replaced
    /// * `Ok(false)` - no record with that id
    async fn update(&self, record: &CredentialRecord) -> CoreResult<bool>;

    /// Delete the first record matching `matcher`
    ///
    /// # Returns
    /// Number of deleted records (0 or 1)
    async fn delete_one(&self, matcher: &CredentialMatcher) -> CoreResult<u64>;
}
