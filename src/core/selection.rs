//! Selected-text capture via a simulated copy
//!
//! The frontmost app is asked to copy its selection; whatever lands on the
//! cleared clipboard is the selection. If nothing new arrives the previous
//! clipboard text is put back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::clipboard::ClipboardAccess;
use crate::shared::error::AppResult;

/// Makes the frontmost application copy its selection
#[async_trait]
pub trait CopyTrigger: Send + Sync {
    async fn trigger_copy(&self) -> AppResult<()>;
}

#[async_trait]
pub trait SelectionSource: Send + Sync {
    async fn selected_text(&self) -> Option<String>;
}

pub struct SelectionCapture {
    clipboard: Arc<dyn ClipboardAccess>,
    trigger: Arc<dyn CopyTrigger>,
    settle_delay: Duration,
}

impl SelectionCapture {
    pub fn new(
        clipboard: Arc<dyn ClipboardAccess>,
        trigger: Arc<dyn CopyTrigger>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            clipboard,
            trigger,
            settle_delay,
        }
    }

    fn restore(&self, previous: Option<&str>) {
        if let Some(text) = previous.filter(|t| !t.is_empty()) {
            if let Err(e) = self.clipboard.write_text(text) {
                tracing::warn!("[Selection] Failed to restore clipboard: {}", e);
            }
        }
    }

    async fn capture(&self, previous: Option<&str>) -> AppResult<Option<String>> {
        self.clipboard.clear()?;
        self.trigger.trigger_copy().await?;
        tokio::time::sleep(self.settle_delay).await;

        let copied = self.clipboard.read_text()?;
        match copied {
            Some(text) if Some(text.as_str()) != previous => Ok(Some(text)),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl SelectionSource for SelectionCapture {
    async fn selected_text(&self) -> Option<String> {
        let previous = match self.clipboard.read_text() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("[Selection] Could not read clipboard before copy: {}", e);
                None
            }
        };

        match self.capture(previous.as_deref()).await {
            Ok(Some(text)) => Some(text),
            Ok(None) => {
                tracing::debug!("[Selection] Nothing new on the clipboard");
                self.restore(previous.as_deref());
                None
            }
            Err(e) => {
                tracing::error!("[Selection] Error getting selected text: {}", e);
                self.restore(previous.as_deref());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::tests::MemoryClipboard;
    use crate::shared::error::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Copies a fixed selection into the clipboard, like the frontmost app would
    struct FakeCopy {
        clipboard: Arc<MemoryClipboard>,
        selection: Option<String>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeCopy {
        fn new(clipboard: Arc<MemoryClipboard>, selection: Option<&str>) -> Self {
            Self {
                clipboard,
                selection: selection.map(str::to_string),
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CopyTrigger for FakeCopy {
        async fn trigger_copy(&self) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::AccessibilityDenied);
            }
            if let Some(text) = &self.selection {
                *self.clipboard.contents.lock().unwrap() = Some(text.clone());
            }
            Ok(())
        }
    }

    fn capture_with(clipboard: &Arc<MemoryClipboard>, trigger: FakeCopy) -> (SelectionCapture, Arc<FakeCopy>) {
        let trigger = Arc::new(trigger);
        let capture = SelectionCapture::new(clipboard.clone(), trigger.clone(), Duration::from_millis(100));
        (capture, trigger)
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_new_selection() {
        let clipboard = Arc::new(MemoryClipboard::with_text("old clipboard"));
        let (capture, trigger) = capture_with(&clipboard, FakeCopy::new(clipboard.clone(), Some("selected words")));

        assert_eq!(capture.selected_text().await.as_deref(), Some("selected words"));
        assert_eq!(trigger.calls.load(Ordering::SeqCst), 1);
        assert_eq!(clipboard.current().as_deref(), Some("selected words"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_copied_restores_previous() {
        let clipboard = Arc::new(MemoryClipboard::with_text("keep me"));
        let (capture, _) = capture_with(&clipboard, FakeCopy::new(clipboard.clone(), None));

        assert_eq!(capture.selected_text().await, None);
        assert_eq!(clipboard.current().as_deref(), Some("keep me"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_text_as_before_counts_as_no_selection() {
        let clipboard = Arc::new(MemoryClipboard::with_text("same"));
        let (capture, _) = capture_with(&clipboard, FakeCopy::new(clipboard.clone(), Some("same")));

        assert_eq!(capture.selected_text().await, None);
        assert_eq!(clipboard.current().as_deref(), Some("same"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_clipboard_is_not_restored() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let (capture, _) = capture_with(&clipboard, FakeCopy::new(clipboard.clone(), None));

        assert_eq!(capture.selected_text().await, None);
        assert!(clipboard.writes.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_failure_restores_previous() {
        let clipboard = Arc::new(MemoryClipboard::with_text("previous"));
        let mut trigger = FakeCopy::new(clipboard.clone(), Some("never copied"));
        trigger.fail = true;
        let (capture, _) = capture_with(&clipboard, trigger);

        assert_eq!(capture.selected_text().await, None);
        assert_eq!(clipboard.current().as_deref(), Some("previous"));
    }
}
