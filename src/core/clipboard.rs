//! Clipboard module
//!
//! Plain-text clipboard access behind a trait so the capture and translation
//! flow can run against a fake in tests.

use cli_clipboard::{ClipboardContext, ClipboardProvider};

use crate::shared::error::{AppError, AppResult};

pub trait ClipboardAccess: Send + Sync {
    /// Current text, `None` when the clipboard holds no text
    fn read_text(&self) -> AppResult<Option<String>>;
    fn write_text(&self, text: &str) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

/// System pasteboard; a fresh context per call keeps it `Send`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn context() -> AppResult<ClipboardContext> {
        ClipboardContext::new().map_err(|e| AppError::Clipboard(e.to_string()))
    }
}

impl ClipboardAccess for SystemClipboard {
    fn read_text(&self) -> AppResult<Option<String>> {
        let mut ctx = Self::context()?;
        match ctx.get_contents() {
            Ok(text) if text.is_empty() => Ok(None),
            Ok(text) => Ok(Some(text)),
            // Non-text or empty pasteboard
            Err(e) => {
                tracing::debug!("[Clipboard] No text available: {}", e);
                Ok(None)
            }
        }
    }

    fn write_text(&self, text: &str) -> AppResult<()> {
        let mut ctx = Self::context()?;
        ctx.set_contents(text.to_string())
            .map_err(|e| AppError::Clipboard(format!("Failed to write clipboard: {}", e)))?;
        tracing::debug!("[Clipboard] Wrote {} bytes", text.len());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let mut ctx = Self::context()?;
        ctx.set_contents(String::new())
            .map_err(|e| AppError::Clipboard(format!("Failed to clear clipboard: {}", e)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory clipboard that records every write
    #[derive(Default)]
    pub(crate) struct MemoryClipboard {
        pub contents: Mutex<Option<String>>,
        pub writes: Mutex<Vec<String>>,
    }

    impl MemoryClipboard {
        pub fn with_text(text: &str) -> Self {
            let clipboard = Self::default();
            *clipboard.contents.lock().unwrap() = Some(text.to_string());
            clipboard
        }

        pub fn current(&self) -> Option<String> {
            self.contents.lock().unwrap().clone()
        }
    }

    impl ClipboardAccess for MemoryClipboard {
        fn read_text(&self) -> AppResult<Option<String>> {
            Ok(self.current().filter(|t| !t.is_empty()))
        }

        fn write_text(&self, text: &str) -> AppResult<()> {
            *self.contents.lock().unwrap() = Some(text.to_string());
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn clear(&self) -> AppResult<()> {
            *self.contents.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn test_memory_clipboard_treats_empty_as_none() {
        let clipboard = MemoryClipboard::with_text("");
        assert_eq!(clipboard.read_text().unwrap(), None);
        clipboard.write_text("hello").unwrap();
        assert_eq!(clipboard.read_text().unwrap().as_deref(), Some("hello"));
        clipboard.clear().unwrap();
        assert_eq!(clipboard.read_text().unwrap(), None);
    }
}
