//! Clipboard adapters.
//!
//! `Osc52Clipboard` asks the terminal emulator to set the system clipboard
//! through the OSC 52 escape sequence, which also works over SSH. Terminals
//! that do not support it silently ignore the sequence.

use std::io::{Stdout, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::sync::RwLock;
use vaultora_core::error::{CoreError, CoreResult};
use vaultora_core::traits::Clipboard;

/// Clipboard that writes OSC 52 sequences to a terminal
pub struct Osc52Clipboard<W> {
    writer: Mutex<W>,
}

impl<W: Write> Osc52Clipboard<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the adapter and return the underlying writer
    pub fn into_inner(self) -> CoreResult<W> {
        self.writer
            .into_inner()
            .map_err(|_| CoreError::ClipboardError("Clipboard writer lock poisoned".to_string()))
    }
}

impl Osc52Clipboard<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64.encode(text))
}

#[async_trait]
impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    async fn write_text(&self, text: &str) -> CoreResult<()> {
        let sequence = osc52_sequence(text);
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| CoreError::ClipboardError("Clipboard writer lock poisoned".to_string()))?;

        writer
            .write_all(sequence.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| CoreError::ClipboardError(format!("Failed to write to terminal: {e}")))
    }
}

/// Clipboard kept in process memory (headless sessions and tests)
#[derive(Default)]
pub struct MemoryClipboard {
    content: RwLock<Option<String>>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn content(&self) -> Option<String> {
        self.content.read().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> CoreResult<()> {
        *self.content.write().await = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_format() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[tokio::test]
    async fn osc52_writes_sequence() {
        let clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("secret").await.unwrap();

        let written = String::from_utf8(clipboard.into_inner().unwrap()).unwrap();
        assert_eq!(written, osc52_sequence("secret"));
    }

    #[tokio::test]
    async fn memory_clipboard_keeps_last_value() {
        let clipboard = MemoryClipboard::new();
        clipboard.write_text("a").await.unwrap();
        clipboard.write_text("b").await.unwrap();
        assert_eq!(clipboard.content().await.as_deref(), Some("b"));
    }
}
