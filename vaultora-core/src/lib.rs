//! Vaultora Core Library
//!
//! Provides core business logic for the Vaultora password store, including:
//! - Credential store client (in-memory list, local cache write-through, remote sync)
//! - Credential service (server-side collection operations)
//!
//! This library is designed to be platform-independent, abstracting the storage layer through traits,
//! Supports CLI front ends and the Actix-Web backend.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ClientContext, CredentialService, CredentialStoreClient, SyncPolicy};
pub use traits::{Clipboard, CredentialRemote, CredentialRepository, LocalCache};
