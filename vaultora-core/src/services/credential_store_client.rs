//! Credential store client
//!
//! Owns the in-memory credential list together with the presentation state
//! (edit selection, reveal flags, error banners). Every mutation is written
//! through to the local cache before it becomes visible; the remote service is
//! consulted on `load()` when no snapshot exists and, under
//! `SyncPolicy::BestEffort`, after each committed mutation.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::services::ClientContext;
use crate::traits::CREDENTIALS_CACHE_KEY;
use crate::types::{CredentialField, CredentialInput, CredentialRecord};

/// Shown instead of a password whose row is not revealed
pub const PASSWORD_MASK: &str = "••••••••";

/// How local mutations are propagated to the remote service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncPolicy {
    /// Mutations only touch the local cache
    #[default]
    LocalOnly,
    /// Mutations are pushed to the remote by id after the cache write; failures are reported, never rolled back
    BestEffort,
}

/// Where `load()` took its records from
#[derive(Debug)]
pub enum LoadOutcome {
    /// Snapshot found in the local cache, network skipped
    Cache { count: usize },
    /// Fetched from the remote service and written to the cache
    Remote { count: usize },
    /// Loading failed and the error is kept in `last_error()`.
    /// `load()` leaves an empty list, `refresh()` keeps the previous one.
    Fallback(CoreError),
}

enum RemoteChange<'a> {
    Create(&'a CredentialRecord),
    Update(&'a CredentialRecord),
    Delete(&'a str),
}

/// Credential store client
pub struct CredentialStoreClient {
    ctx: Arc<ClientContext>,
    policy: SyncPolicy,
    records: Vec<CredentialRecord>,
    editing_id: Option<String>,
    revealed_rows: BTreeSet<usize>,
    global_visible: bool,
    last_error: Option<String>,
    sync_error: Option<String>,
}

impl CredentialStoreClient {
    /// Create a client with an empty list; call `load()` to populate it
    #[must_use]
    pub fn new(ctx: Arc<ClientContext>, policy: SyncPolicy) -> Self {
        Self {
            ctx,
            policy,
            records: Vec::new(),
            editing_id: None,
            revealed_rows: BTreeSet::new(),
            global_visible: false,
            last_error: None,
            sync_error: None,
        }
    }

    // ===== State accessors =====

    #[must_use]
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    #[must_use]
    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Id of the record selected for editing
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    /// Banner from the last failed `load()` or cache write
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Banner from the last failed remote push
    #[must_use]
    pub fn sync_error(&self) -> Option<&str> {
        self.sync_error.as_deref()
    }

    pub fn clear_errors(&mut self) {
        self.last_error = None;
        self.sync_error = None;
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    // ===== Loading =====

    /// Load the credential list
    ///
    /// Cache snapshot first; the remote is only asked when no snapshot exists.
    /// Failures leave an empty list and a banner in `last_error()`, no retry.
    pub async fn load(&mut self) -> LoadOutcome {
        self.last_error = None;

        let cached = self.ctx.local_cache().get(CREDENTIALS_CACHE_KEY).await;
        match cached {
            Ok(Some(snapshot)) => {
                return match serde_json::from_str::<Vec<CredentialRecord>>(&snapshot) {
                    Ok(records) => {
                        let count = records.len();
                        self.adopt(records);
                        log::info!("Loaded {count} credentials from local cache");
                        LoadOutcome::Cache { count }
                    }
                    Err(e) => self.fall_back(CoreError::from(e)),
                };
            }
            Ok(None) => {
                log::debug!("No local snapshot, fetching credentials from remote");
            }
            Err(e) => return self.fall_back(e),
        }

        match self.ctx.remote().list_all().await {
            Ok(records) => self.adopt_remote(records).await,
            Err(e) => self.fall_back(e),
        }
    }

    /// Replace the list and the cache snapshot with the remote collection
    ///
    /// The remote is fetched first. If that fails, the current list and the
    /// snapshot are both kept and the error goes to `last_error()`.
    pub async fn refresh(&mut self) -> LoadOutcome {
        self.last_error = None;

        match self.ctx.remote().list_all().await {
            Ok(records) => self.adopt_remote(records).await,
            Err(e) => {
                log::warn!(
                    "Refresh failed, keeping {} local credentials: {e}",
                    self.records.len()
                );
                self.last_error = Some(e.to_string());
                LoadOutcome::Fallback(e)
            }
        }
    }

    // ===== Mutations =====

    /// Save a credential
    ///
    /// With `editing_id` the matching record is replaced and keeps its id,
    /// otherwise a record with a fresh id is appended. Nothing changes unless
    /// validation and the cache write both succeed.
    pub async fn save(
        &mut self,
        input: CredentialInput,
        editing_id: Option<&str>,
    ) -> CoreResult<CredentialRecord> {
        input.validate()?;

        let mut next = self.records.clone();
        let (record, created) = if let Some(id) = editing_id {
            let slot = next
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| CoreError::CredentialNotFound(id.to_string()))?;
            *slot = CredentialRecord::with_id(id.to_string(), input);
            (slot.clone(), false)
        } else {
            let record = self.fresh_record(input);
            next.push(record.clone());
            (record, true)
        };

        self.commit(next).await?;
        log::info!(
            "Credential {} {}",
            record.id,
            if created { "saved" } else { "updated" }
        );

        let change = if created {
            RemoteChange::Create(&record)
        } else {
            RemoteChange::Update(&record)
        };
        self.push_remote(change).await;

        Ok(record)
    }

    /// Save using the current edit selection, clearing it on success
    pub async fn submit(&mut self, input: CredentialInput) -> CoreResult<CredentialRecord> {
        let editing_id = self.editing_id.clone();
        let record = self.save(input, editing_id.as_deref()).await?;
        self.editing_id = None;
        Ok(record)
    }

    /// Delete the record with this id
    pub async fn delete(&mut self, id: &str) -> CoreResult<CredentialRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::CredentialNotFound(id.to_string()))?;

        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next).await?;

        self.shift_revealed_rows(index);
        if self.editing_id.as_deref() == Some(id) {
            self.editing_id = None;
        }
        log::info!("Credential {id} deleted");

        self.push_remote(RemoteChange::Delete(id)).await;

        Ok(removed)
    }

    // ===== Edit selection =====

    /// Select a record for editing and return its content for the form
    pub fn begin_edit(&mut self, id: &str) -> CoreResult<CredentialInput> {
        let input = self
            .find(id)
            .map(CredentialRecord::to_input)
            .ok_or_else(|| CoreError::CredentialNotFound(id.to_string()))?;
        self.editing_id = Some(id.to_string());
        Ok(input)
    }

    /// Deselect the record being edited
    pub fn cancel_edit(&mut self) -> CoreResult<()> {
        self.editing_id.take().map(|_| ()).ok_or(CoreError::NotEditing)
    }

    // ===== Clipboard =====

    /// Copy a value to the platform clipboard
    pub async fn copy(&self, value: &str) -> CoreResult<()> {
        self.ctx
            .clipboard()
            .write_text(value)
            .await
            .inspect_err(|e| log::warn!("Failed to copy to clipboard: {e}"))
    }

    /// Copy one field of the record with this id
    pub async fn copy_field(&self, id: &str, field: CredentialField) -> CoreResult<()> {
        let record = self
            .find(id)
            .ok_or_else(|| CoreError::CredentialNotFound(id.to_string()))?;
        self.copy(field.value_of(record)).await
    }

    // ===== Visibility =====

    /// Flip the reveal flag of one row, returning the new state
    pub fn toggle_visibility(&mut self, row_index: usize) -> bool {
        if self.revealed_rows.remove(&row_index) {
            false
        } else {
            self.revealed_rows.insert(row_index);
            true
        }
    }

    /// Flip the form-level password visibility, returning the new state
    pub fn toggle_global_visibility(&mut self) -> bool {
        self.global_visible = !self.global_visible;
        self.global_visible
    }

    #[must_use]
    pub fn is_revealed(&self, row_index: usize) -> bool {
        self.revealed_rows.contains(&row_index)
    }

    #[must_use]
    pub fn is_global_visible(&self) -> bool {
        self.global_visible
    }

    /// Password as it should be displayed for a row, masked unless revealed
    #[must_use]
    pub fn display_password(&self, row_index: usize) -> Option<&str> {
        let record = self.records.get(row_index)?;
        Some(if self.is_revealed(row_index) {
            record.password.as_str()
        } else {
            PASSWORD_MASK
        })
    }

    // ===== Internals =====

    fn adopt(&mut self, records: Vec<CredentialRecord>) {
        self.records = records;
        self.editing_id = None;
        self.revealed_rows.clear();
    }

    async fn adopt_remote(&mut self, records: Vec<CredentialRecord>) -> LoadOutcome {
        let count = records.len();
        if let Err(e) = self.write_snapshot(&records).await {
            log::warn!("Failed to seed local cache: {e}");
            self.last_error = Some(e.to_string());
        }
        self.adopt(records);
        log::info!("Loaded {count} credentials from remote");
        LoadOutcome::Remote { count }
    }

    fn fall_back(&mut self, err: CoreError) -> LoadOutcome {
        if err.is_expected() {
            log::warn!("Failed to load credentials, using empty list: {err}");
        } else {
            log::error!("Failed to load credentials, using empty list: {err}");
        }
        self.adopt(Vec::new());
        self.last_error = Some(err.to_string());
        LoadOutcome::Fallback(err)
    }

    fn fresh_record(&self, input: CredentialInput) -> CredentialRecord {
        let mut record = CredentialRecord::new(input);
        while self.find(&record.id).is_some() {
            record.id = uuid::Uuid::new_v4().to_string();
        }
        record
    }

    async fn write_snapshot(&self, records: &[CredentialRecord]) -> CoreResult<()> {
        let snapshot = serde_json::to_string(records)?;
        self.ctx
            .local_cache()
            .set(CREDENTIALS_CACHE_KEY, &snapshot)
            .await
    }

    /// Persist `next` and adopt it; on failure the current list stays untouched
    async fn commit(&mut self, next: Vec<CredentialRecord>) -> CoreResult<()> {
        if let Err(e) = self.write_snapshot(&next).await {
            log::error!("Failed to write local cache, keeping previous list: {e}");
            return Err(e);
        }
        self.records = next;
        Ok(())
    }

    fn shift_revealed_rows(&mut self, removed: usize) {
        self.revealed_rows = self
            .revealed_rows
            .iter()
            .filter(|&&row| row != removed)
            .map(|&row| if row > removed { row - 1 } else { row })
            .collect();
    }

    async fn push_remote(&mut self, change: RemoteChange<'_>) {
        if self.policy == SyncPolicy::LocalOnly {
            return;
        }

        let remote = self.ctx.remote();
        let result = match change {
            RemoteChange::Create(record) => remote.create(record).await,
            RemoteChange::Update(record) => match remote.update(record).await {
                Err(CoreError::CredentialNotFound(_)) => remote.create(record).await,
                other => other,
            },
            RemoteChange::Delete(id) => match remote.delete_by_id(id).await {
                Err(CoreError::CredentialNotFound(_)) => Ok(()),
                other => other,
            },
        };

        match result {
            Ok(()) => self.sync_error = None,
            Err(e) => {
                log::warn!("Remote sync failed, local change kept: {e}");
                self.sync_error = Some(e.to_string());
            }
        }
    }
}
