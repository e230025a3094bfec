//! Global translation shortcut
//!
//! Only one shortcut is ever registered; re-registering replaces it.

use std::time::Duration;

use async_trait::async_trait;
use tauri::{AppHandle, Manager};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutEvent, ShortcutState};

use crate::core::settings::ShortcutBinder;
use crate::shared::error::{AppError, AppResult};
use crate::state::AppState;

const MAX_ATTEMPTS: u32 = 5;
const BASE_RETRY_DELAY_MS: u64 = 100;

/// Parse an accelerator such as `Command+Option+T`
pub fn parse_shortcut(accelerator: &str) -> AppResult<Shortcut> {
    let accelerator = accelerator.trim();
    if accelerator.is_empty() {
        return Err(AppError::Shortcut("Shortcut cannot be empty".to_string()));
    }
    accelerator
        .parse::<Shortcut>()
        .map_err(|e| AppError::Shortcut(format!("Invalid shortcut '{}': {}", accelerator, e)))
}

/// Exponential backoff: 100ms, 200ms, 400ms, 800ms
fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_RETRY_DELAY_MS * 2_u64.pow(attempt))
}

fn on_translation_shortcut(app: &AppHandle, _shortcut: &Shortcut, event: ShortcutEvent) {
    // Key release fires too
    if event.state() != ShortcutState::Pressed {
        return;
    }

    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        let Some(state) = app.try_state::<AppState>() else {
            tracing::warn!("[Shortcut] App state not ready, ignoring shortcut");
            return;
        };

        let direction = state.settings.direction().await;
        if let Some(result) = state.workflow.trigger(direction).await {
            tracing::debug!("[Shortcut] Translation finished (success: {})", result.success);
        }
    });
}

/// Replace any registered shortcut with the translation shortcut.
///
/// Blocks between retries; call off the async runtime.
pub fn register_translation_shortcut(app: &AppHandle, accelerator: &str) -> AppResult<()> {
    let shortcut = parse_shortcut(accelerator)?;
    let global_shortcut = app.global_shortcut();

    if let Err(e) = global_shortcut.unregister_all() {
        tracing::debug!("[Shortcut] Unregister attempt failed (expected on first run): {}", e);
    }

    let mut last_error = None;
    for attempt in 0..MAX_ATTEMPTS {
        match global_shortcut.on_shortcut(shortcut, on_translation_shortcut) {
            Ok(()) => {
                tracing::info!(
                    "[Shortcut] Registered global shortcut: {} (attempt {})",
                    accelerator,
                    attempt + 1
                );
                return Ok(());
            }
            Err(e) => {
                if attempt + 1 < MAX_ATTEMPTS {
                    let delay = retry_delay(attempt);
                    tracing::warn!(
                        "[Shortcut] Registration attempt {} failed: {}. Retrying in {}ms...",
                        attempt + 1,
                        e,
                        delay.as_millis()
                    );
                    std::thread::sleep(delay);
                }
                last_error = Some(e);
            }
        }
    }

    let detail = last_error.map(|e| e.to_string()).unwrap_or_default();
    tracing::error!(
        "[Shortcut] Failed to register {} after {} attempts: {}",
        accelerator,
        MAX_ATTEMPTS,
        detail
    );
    Err(AppError::Shortcut(format!(
        "Failed to register shortcut '{}': {}",
        accelerator, detail
    )))
}

/// Registers through the global shortcut plugin, off the async runtime
pub struct TauriShortcutBinder {
    app: AppHandle,
}

impl TauriShortcutBinder {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl ShortcutBinder for TauriShortcutBinder {
    async fn bind(&self, accelerator: &str) -> AppResult<()> {
        // Bad accelerators never reach the retry loop
        parse_shortcut(accelerator)?;
        let app = self.app.clone();
        let accelerator = accelerator.to_string();
        tauri::async_runtime::spawn_blocking(move || register_translation_shortcut(&app, &accelerator))
            .await?
    }
}

pub fn unregister_all_shortcuts(app: &AppHandle) {
    match app.global_shortcut().unregister_all() {
        Ok(()) => tracing::info!("[Shortcut] Unregistered all shortcuts"),
        Err(e) => tracing::warn!("[Shortcut] Failed to unregister shortcuts: {}", e),
    }
}

pub fn is_shortcut_registered(app: &AppHandle, accelerator: &str) -> bool {
    parse_shortcut(accelerator)
        .map(|shortcut| app.global_shortcut().is_registered(shortcut))
        .unwrap_or(false)
}
