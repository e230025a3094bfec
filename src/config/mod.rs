//! Window configuration registry and application constants
//!
//! Centralized window configuration to eliminate hardcoded dimensions.
//! Maps window IDs to WindowConfig structs.

use std::time::Duration;

pub const APP_NAME: &str = "Gemini Translation";
pub const TRAY_ID: &str = "main-tray";
pub const KEYRING_SERVICE: &str = "gemini-translation";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const DEFAULT_SHORTCUT: &str = "Command+Option+T";

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const GEMINI_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Env overrides
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Wait for the frontmost app to fill the pasteboard after Cmd+C
pub const CLIPBOARD_SETTLE_DELAY: Duration = Duration::from_millis(100);
pub const STATUS_HIDE_DELAY: Duration = Duration::from_millis(2000);
pub const STATUS_CURSOR_OFFSET: f64 = 20.0;

pub const SETTINGS_WINDOW: &str = "settings";
pub const STATUS_WINDOW: &str = "status";

/// Window configuration for a widget
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub transparent: bool,
    pub resizable: bool,
    pub decorations: bool,
}

impl WindowConfig {
    pub fn new(width: f64, height: f64, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            transparent: false,
            resizable: false,
            decorations: true,
        }
    }

    fn overlay(mut self) -> Self {
        self.transparent = true;
        self.decorations = false;
        self
    }
}

/// Window registry mapping widget IDs to configurations
pub fn get_window_config(widget: &str) -> WindowConfig {
    match widget {
        SETTINGS_WINDOW => WindowConfig::new(600.0, 700.0, "Gemini Translation Settings"),
        STATUS_WINDOW => WindowConfig::new(200.0, 60.0, "Translation Status").overlay(),
        _ => WindowConfig::new(500.0, 400.0, APP_NAME), // Default fallback
    }
}

pub fn window_label(widget: &str) -> String {
    format!("{}-window", widget)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Model name, honoring the env override
pub fn gemini_model() -> String {
    gemini_model_from(env_var(MODEL_ENV))
}

fn gemini_model_from(env: Option<String>) -> String {
    env.map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
}

/// Stored key first, then the env fallback
pub fn resolve_api_key(stored: &str) -> Option<String> {
    resolve_api_key_from(stored, env_var(API_KEY_ENV))
}

fn resolve_api_key_from(stored: &str, env: Option<String>) -> Option<String> {
    let stored = stored.trim();
    if !stored.is_empty() {
        return Some(stored.to_string());
    }
    env.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}
