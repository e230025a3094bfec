use tauri::{AppHandle, Emitter};

use super::events::AppEvent;
use super::settings::AppSettings;
use crate::core::settings::SettingsListener;

/// Emit an application event to all windows
pub fn emit_event(app: &AppHandle, event: AppEvent) {
    let name = event.name();
    let result = match &event {
        AppEvent::SettingsUpdated(settings) => app.emit(name, settings),
        AppEvent::StatusUpdated(update) => app.emit(name, update),
    };

    if let Err(e) = result {
        tracing::warn!("[Emit] Failed to emit {}: {}", name, e);
    }
}

/// Emit an application event to a single window
pub fn emit_event_to(app: &AppHandle, label: &str, event: AppEvent) {
    let name = event.name();
    let result = match &event {
        AppEvent::SettingsUpdated(settings) => app.emit_to(label, name, settings),
        AppEvent::StatusUpdated(update) => app.emit_to(label, name, update),
    };

    if let Err(e) = result {
        tracing::warn!("[Emit] Failed to emit {} to {}: {}", name, label, e);
    }
}

/// Pushes saved settings to every open window as `settings://updated`
pub struct SettingsBroadcast {
    app: AppHandle,
}

impl SettingsBroadcast {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl SettingsListener for SettingsBroadcast {
    fn settings_updated(&self, masked: &AppSettings) {
        emit_event(&self.app, AppEvent::SettingsUpdated(masked.clone()));
    }
}
