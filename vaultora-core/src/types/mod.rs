//! 类型定义模块

mod credential;
mod response;

pub use credential::{CredentialField, CredentialInput, CredentialMatcher, CredentialRecord};
pub use response::Acknowledgement;
