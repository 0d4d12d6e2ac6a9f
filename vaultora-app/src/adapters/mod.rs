//! Platform adapters for the client traits (CLI and other non-browser frontends).

mod clipboard;
mod http_remote;
mod json_file_cache;
mod memory_cache;

pub use clipboard::{MemoryClipboard, Osc52Clipboard};
pub use http_remote::HttpCredentialRemote;
pub use json_file_cache::JsonFileCache;
pub use memory_cache::MemoryCache;
