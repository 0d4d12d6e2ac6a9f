//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A required field is missing (blocks the operation)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No credential record with this id
    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    /// No record is currently selected for editing
    #[error("No credential is being edited")]
    NotEditing,

    /// Transport failure: service unreachable, timeout, unreadable body
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Transport failure: the service answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Platform clipboard failure
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    /// Storage layer error (local cache or database)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be read or is invalid
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_)
            | Self::CredentialNotFound(_)
            | Self::NotEditing
            | Self::NetworkError(_)
            | Self::UnexpectedStatus { .. }
            | Self::ClipboardError(_) => true,
            Self::StorageError(_) | Self::SerializationError(_) | Self::ConfigError(_) => false,
        }
    }

    /// Whether the error belongs to the transport category (network or non-success status).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::UnexpectedStatus { .. })
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
