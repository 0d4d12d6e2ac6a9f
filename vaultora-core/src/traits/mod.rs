//! Storage layer abstraction trait definition

mod clipboard;
mod credential_remote;
mod credential_repository;
mod local_cache;

pub use clipboard::Clipboard;
pub use credential_remote::CredentialRemote;
pub use credential_repository::CredentialRepository;
pub use local_cache::{LocalCache, CREDENTIALS_CACHE_KEY};
