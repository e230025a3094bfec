//! Transient status toast
//!
//! `translating` stays up until replaced, `success` and `error` hide
//! themselves after a delay. Showing anything cancels a pending hide.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::shared::error::AppResult;
use crate::shared::types::{StatusKind, StatusUpdate};

/// Where the toast is drawn
pub trait StatusSurface: Send + Sync {
    fn present(&self, update: &StatusUpdate) -> AppResult<()>;
    fn hide(&self) -> AppResult<()>;
    fn destroy(&self) -> AppResult<()>;
}

/// What the translation flow talks to
pub trait StatusSink: Send + Sync {
    fn show(&self, message: &str, kind: StatusKind);
}

pub struct StatusController {
    surface: Arc<dyn StatusSurface>,
    hide_after: Duration,
    hide_task: Mutex<Option<JoinHandle<()>>>,
}

impl StatusController {
    pub fn new(surface: Arc<dyn StatusSurface>, hide_after: Duration) -> Self {
        Self {
            surface,
            hide_after,
            hide_task: Mutex::new(None),
        }
    }

    fn cancel_pending_hide(&self) {
        let mut task = self.hide_task.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }

    fn schedule_hide(&self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("[Status] No async runtime, toast will not auto-hide");
            return;
        };

        let surface = self.surface.clone();
        let delay = self.hide_after;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = surface.hide() {
                tracing::warn!("[Status] Failed to hide status window: {}", e);
            }
        });

        let mut task = self.hide_task.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
    }

    pub fn show_update(&self, update: StatusUpdate) {
        self.cancel_pending_hide();

        if let Err(e) = self.surface.present(&update) {
            tracing::warn!("[Status] Failed to show '{}': {}", update.message, e);
        }

        if update.kind.auto_hides() {
            self.schedule_hide();
        }
    }

    pub fn hide(&self) {
        self.cancel_pending_hide();
        if let Err(e) = self.surface.hide() {
            tracing::warn!("[Status] Failed to hide status window: {}", e);
        }
    }

    pub fn destroy(&self) {
        self.cancel_pending_hide();
        if let Err(e) = self.surface.destroy() {
            tracing::warn!("[Status] Failed to destroy status window: {}", e);
        }
    }
}

impl StatusSink for StatusController {
    fn show(&self, message: &str, kind: StatusKind) {
        self.show_update(StatusUpdate::new(message, kind));
    }
}
