//! Settings command module
//!
//! Handles application settings persistence. Applying a save to the live
//! shortcut and translator happens in the settings service.

use tauri::State;

use crate::shared::error::AppResult;
use crate::shared::settings::{AppSettings, SettingsUpdate};
use crate::shared::types::SaveSettingsResponse;
use crate::state::AppState;

/// Get current application settings (API key masked)
#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> AppResult<AppSettings> {
    Ok(state.settings.masked().await)
}

/// Save application settings
#[tauri::command]
pub async fn save_settings(
    state: State<'_, AppState>,
    settings: SettingsUpdate,
) -> AppResult<SaveSettingsResponse> {
    state.settings.save(settings).await?;
    Ok(SaveSettingsResponse { success: true })
}
