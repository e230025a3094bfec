//! System integration command module
//!
//! Handles system-level operations like accessibility permissions and logging.

use tauri::{AppHandle, State};
use tauri_plugin_opener::OpenerExt;

use crate::shared::error::{AppError, AppResult};
use crate::state::AppState;
use crate::system::{automation, shortcut};

/// Only web links leave the app
pub(crate) fn validate_external_url(url: &str) -> AppResult<&str> {
    let url = url.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(url)
    } else {
        Err(AppError::Validation(format!("Refusing to open non-web URL: {}", url)))
    }
}

/// Open a link (e.g. the API key page) in the default browser
#[tauri::command]
pub fn open_external(app: AppHandle, url: String) -> AppResult<()> {
    let url = validate_external_url(&url)?;
    app.opener()
        .open_url(url, None::<&str>)
        .map_err(|e| AppError::System(format!("Failed to open {}: {}", url, e)))
}

/// Check if accessibility permissions are granted (macOS only)
#[tauri::command]
pub async fn check_accessibility_permissions() -> AppResult<bool> {
    Ok(automation::check_accessibility_permissions())
}

#[tauri::command]
pub async fn is_shortcut_registered(app: AppHandle, state: State<'_, AppState>) -> AppResult<bool> {
    let accelerator = state.settings.shortcut().await;
    Ok(shortcut::is_shortcut_registered(&app, &accelerator))
}

/// Log a message from the frontend
#[tauri::command]
pub fn log_message(level: String, message: String) -> AppResult<()> {
    match level.to_lowercase().as_str() {
        "error" => tracing::error!(target: "frontend", "{}", message),
        "warn" | "warning" => tracing::warn!(target: "frontend", "{}", message),
        "debug" => tracing::debug!(target: "frontend", "{}", message),
        _ => tracing::info!(target: "frontend", "{}", message),
    }
    Ok(())
}
