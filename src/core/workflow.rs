//! Shortcut-triggered translation flow
//!
//! capture selection → pick direction → translate → clipboard → toast

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::clipboard::ClipboardAccess;
use super::language::{resolve_direction, TranslationDirection};
use super::selection::SelectionSource;
use super::status::StatusSink;
use super::translator::Translator;
use crate::shared::types::{StatusKind, TranslationResult};

pub const NO_SELECTION: &str = "No text selected";
pub const NOT_INITIALIZED: &str = "Gemini API not initialized. Please set your API key in settings.";

const STATUS_SET_API_KEY: &str = "Please set API key";
const STATUS_COPIED: &str = "✓ Copied to clipboard";
const STATUS_FAILED: &str = "Translation failed";

const LOG_PREVIEW_CHARS: usize = 50;

/// Busy marker shown while a translation runs (tray icon)
pub trait ActivityIndicator: Send + Sync {
    fn translation_started(&self);
    fn translation_finished(&self);
}

pub struct TranslationWorkflow {
    selection: Arc<dyn SelectionSource>,
    translator: Arc<dyn Translator>,
    clipboard: Arc<dyn ClipboardAccess>,
    status: Arc<dyn StatusSink>,
    activity: Arc<dyn ActivityIndicator>,
    in_flight: AtomicBool,
}

/// Ends the busy state however `run` exits
struct InFlightGuard<'a> {
    workflow: &'a TranslationWorkflow,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.workflow.activity.translation_finished();
        self.workflow.in_flight.store(false, Ordering::Release);
    }
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

impl TranslationWorkflow {
    pub fn new(
        selection: Arc<dyn SelectionSource>,
        translator: Arc<dyn Translator>,
        clipboard: Arc<dyn ClipboardAccess>,
        status: Arc<dyn StatusSink>,
        activity: Arc<dyn ActivityIndicator>,
    ) -> Self {
        Self {
            selection,
            translator,
            clipboard,
            status,
            activity,
            in_flight: AtomicBool::new(false),
        }
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Entry point for the global shortcut. Returns `None` when a
    /// translation is already running.
    pub async fn trigger(&self, preference: TranslationDirection) -> Option<TranslationResult> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("[Workflow] Translation already running, ignoring trigger");
            return None;
        }

        self.activity.translation_started();
        let _guard = InFlightGuard { workflow: self };

        Some(self.run(preference).await)
    }

    pub async fn run(&self, preference: TranslationDirection) -> TranslationResult {
        let selected = match self.selection.selected_text().await {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                tracing::info!("[Workflow] No text selected");
                return TranslationResult::failed(None, NO_SELECTION);
            }
        };

        let pair = resolve_direction(&selected, preference);
        tracing::info!(
            "[Workflow] Translating from {} to {}",
            pair.source.display_name(),
            pair.target.display_name()
        );
        tracing::debug!("[Workflow] Original text: {}...", preview(&selected));

        self.status.show(
            &format!(
                "Translating {} → {}...",
                pair.source.short_code(),
                pair.target.short_code()
            ),
            StatusKind::Translating,
        );

        if !self.translator.is_initialized() {
            self.status.show(STATUS_SET_API_KEY, StatusKind::Error);
            return TranslationResult::failed(Some(selected), NOT_INITIALIZED);
        }

        let translated = match self.translator.translate(&selected, pair.target).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("[Workflow] Translation error: {}", e);
                self.status.show(STATUS_FAILED, StatusKind::Error);
                return TranslationResult::failed(None, e.to_string());
            }
        };

        tracing::debug!("[Workflow] Translated text: {}...", preview(&translated));

        if let Err(e) = self.clipboard.write_text(&translated) {
            tracing::error!("[Workflow] Translation error: {}", e);
            self.status.show(STATUS_FAILED, StatusKind::Error);
            return TranslationResult::failed(None, e.to_string());
        }

        self.status.show(STATUS_COPIED, StatusKind::Success);
        TranslationResult::translated(selected, translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::tests::MemoryClipboard;
    use crate::core::language::Language;
    use crate::core::translator::{TranslateError, TranslatorResult};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    struct FakeSelection(Option<String>);

    #[async_trait]
    impl SelectionSource for FakeSelection {
        async fn selected_text(&self) -> Option<String> {
            self.0.clone()
        }
    }

    struct FakeTranslator {
        initialized: bool,
        reply: TranslatorResult<String>,
        calls: Mutex<Vec<(String, Language)>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeTranslator {
        fn replying(reply: TranslatorResult<String>) -> Self {
            Self {
                initialized: true,
                reply,
                calls: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        fn calls(&self) -> Vec<(String, Language)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        fn is_initialized(&self) -> bool {
            self.initialized
        }

        async fn translate(&self, text: &str, target: Language) -> TranslatorResult<String> {
            self.calls.lock().unwrap().push((text.to_string(), target));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.reply.clone()
        }
    }

    #[derive(Default)]
    struct RecordingStatus(Mutex<Vec<(String, StatusKind)>>);

    impl RecordingStatus {
        fn shown(&self) -> Vec<(String, StatusKind)> {
            self.0.lock().unwrap().clone()
        }
    }

    impl StatusSink for RecordingStatus {
        fn show(&self, message: &str, kind: StatusKind) {
            self.0.lock().unwrap().push((message.to_string(), kind));
        }
    }

    #[derive(Default)]
    struct CountingActivity {
        started: AtomicUsize,
        finished: AtomicUsize,
    }

    impl ActivityIndicator for CountingActivity {
        fn translation_started(&self) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }

        fn translation_finished(&self) {
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Harness {
        workflow: Arc<TranslationWorkflow>,
        translator: Arc<FakeTranslator>,
        clipboard: Arc<MemoryClipboard>,
        status: Arc<RecordingStatus>,
        activity: Arc<CountingActivity>,
    }

    fn harness(selection: Option<&str>, translator: FakeTranslator) -> Harness {
        let translator = Arc::new(translator);
        let clipboard = Arc::new(MemoryClipboard::default());
        let status = Arc::new(RecordingStatus::default());
        let activity = Arc::new(CountingActivity::default());
        let workflow = Arc::new(TranslationWorkflow::new(
            Arc::new(FakeSelection(selection.map(str::to_string))),
            translator.clone(),
            clipboard.clone(),
            status.clone(),
            activity.clone(),
        ));
        Harness {
            workflow,
            translator,
            clipboard,
            status,
            activity,
        }
    }

    #[tokio::test]
    async fn test_no_selection_shows_nothing() {
        let h = harness(None, FakeTranslator::replying(Ok("unused".to_string())));
        let result = h.workflow.run(TranslationDirection::Auto).await;

        assert_eq!(result, TranslationResult::failed(None, "No text selected"));
        assert!(h.status.shown().is_empty());
        assert!(h.translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_selection_counts_as_none() {
        let h = harness(Some("  \n\t"), FakeTranslator::replying(Ok("unused".to_string())));
        let result = h.workflow.run(TranslationDirection::Auto).await;

        assert_eq!(result.error.as_deref(), Some(NO_SELECTION));
        assert!(h.translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_english_selection_goes_to_clipboard_in_japanese() {
        let h = harness(Some("Good morning"), FakeTranslator::replying(Ok("おはようございます".to_string())));
        let result = h.workflow.run(TranslationDirection::Auto).await;

        assert_eq!(
            result,
            TranslationResult::translated("Good morning".to_string(), "おはようございます".to_string())
        );
        assert_eq!(h.translator.calls(), vec![("Good morning".to_string(), Language::Japanese)]);
        assert_eq!(h.clipboard.current().as_deref(), Some("おはようございます"));
        assert_eq!(
            h.status.shown(),
            vec![
                ("Translating EN → JP...".to_string(), StatusKind::Translating),
                ("✓ Copied to clipboard".to_string(), StatusKind::Success),
            ]
        );
    }

    #[tokio::test]
    async fn test_japanese_selection_goes_to_english() {
        let h = harness(Some("ありがとう"), FakeTranslator::replying(Ok("Thank you".to_string())));
        h.workflow.run(TranslationDirection::Auto).await;

        assert_eq!(h.translator.calls()[0].1, Language::English);
        assert_eq!(h.status.shown()[0].0, "Translating JP → EN...");
    }

    #[tokio::test]
    async fn test_preference_overrides_detection() {
        let h = harness(Some("ありがとう"), FakeTranslator::replying(Ok("ありがとう".to_string())));
        h.workflow.run(TranslationDirection::EnToJa).await;

        assert_eq!(h.translator.calls()[0].1, Language::Japanese);
        assert_eq!(h.status.shown()[0].0, "Translating EN → JP...");
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let mut translator = FakeTranslator::replying(Ok("unused".to_string()));
        translator.initialized = false;
        let h = harness(Some("Hello"), translator);
        let result = h.workflow.run(TranslationDirection::Auto).await;

        assert!(!result.success);
        assert_eq!(result.original_text.as_deref(), Some("Hello"));
        assert_eq!(result.error.as_deref(), Some(NOT_INITIALIZED));
        assert_eq!(
            h.status.shown(),
            vec![
                ("Translating EN → JP...".to_string(), StatusKind::Translating),
                ("Please set API key".to_string(), StatusKind::Error),
            ]
        );
        assert!(h.translator.calls().is_empty());
        assert_eq!(h.clipboard.current(), None);
    }

    #[tokio::test]
    async fn test_api_failure_reports_message() {
        let h = harness(Some("Hello"), FakeTranslator::replying(Err(TranslateError::QuotaExceeded)));
        let result = h.workflow.run(TranslationDirection::Auto).await;

        assert_eq!(
            result,
            TranslationResult::failed(None, "API quota exceeded. Please check your Gemini API usage.")
        );
        assert_eq!(h.status.shown().last().unwrap(), &("Translation failed".to_string(), StatusKind::Error));
        assert!(h.clipboard.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trigger_brackets_activity() {
        let h = harness(Some("Hello"), FakeTranslator::replying(Ok("こんにちは".to_string())));
        let result = h.workflow.trigger(TranslationDirection::Auto).await.unwrap();

        assert!(result.success);
        assert_eq!(h.activity.started.load(Ordering::SeqCst), 1);
        assert_eq!(h.activity.finished.load(Ordering::SeqCst), 1);
        assert!(!h.workflow.is_busy());
    }

    #[tokio::test]
    async fn test_trigger_ends_activity_on_failure() {
        let h = harness(None, FakeTranslator::replying(Ok("unused".to_string())));
        let result = h.workflow.trigger(TranslationDirection::Auto).await.unwrap();

        assert!(!result.success);
        assert_eq!(h.activity.finished.load(Ordering::SeqCst), 1);
        assert!(!h.workflow.is_busy());
    }

    #[tokio::test]
    async fn test_trigger_ignored_while_running() {
        let gate = Arc::new(Notify::new());
        let mut translator = FakeTranslator::replying(Ok("こんにちは".to_string()));
        translator.gate = Some(gate.clone());
        let h = harness(Some("Hello"), translator);

        let first = {
            let workflow = h.workflow.clone();
            tokio::spawn(async move { workflow.trigger(TranslationDirection::Auto).await })
        };
        while h.translator.calls().is_empty() {
            tokio::task::yield_now().await;
        }

        assert!(h.workflow.is_busy());
        assert_eq!(h.workflow.trigger(TranslationDirection::Auto).await, None);

        gate.notify_one();
        let result = first.await.unwrap().unwrap();
        assert!(result.success);
        assert_eq!(h.activity.started.load(Ordering::SeqCst), 1);
        assert!(!h.workflow.is_busy());
    }
}
