//! Clipboard abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Platform clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard content with `text`
    async fn write_text(&self, text: &str) -> CoreResult<()>;
}
