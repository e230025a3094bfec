//! Menu bar icon

use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
use tauri::tray::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
use tauri::AppHandle;

use super::window::settings::show_settings_window;
use crate::config::{APP_NAME, TRAY_ID};
use crate::core::workflow::ActivityIndicator;
use crate::shared::error::{AppError, AppResult};

const MENU_SETTINGS: &str = "settings";
const MENU_QUIT: &str = "quit";

const BUSY_TOOLTIP: &str = "Gemini Translation (translating...)";
const BUSY_TITLE: &str = "…";

fn open_settings(app: &AppHandle) {
    if let Err(e) = show_settings_window(app) {
        tracing::error!("[Tray] Failed to show settings: {}", e);
    }
}

pub fn build_tray(app: &AppHandle) -> AppResult<TrayIcon> {
    let settings_item = MenuItem::with_id(app, MENU_SETTINGS, "Settings", true, None::<&str>)?;
    let separator = PredefinedMenuItem::separator(app)?;
    let quit_item = MenuItem::with_id(app, MENU_QUIT, "Quit", true, None::<&str>)?;
    let menu = Menu::with_items(app, &[&settings_item, &separator, &quit_item])?;

    let icon = app
        .default_window_icon()
        .cloned()
        .ok_or_else(|| AppError::System("Failed to get default window icon".to_string()))?;

    let tray = TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .icon_as_template(true)
        .tooltip(APP_NAME)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| match event.id().as_ref() {
            MENU_SETTINGS => open_settings(app),
            MENU_QUIT => {
                tracing::info!("[Tray] Quit requested");
                app.exit(0);
            }
            _ => {}
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                open_settings(tray.app_handle());
            }
        })
        .build(app)?;

    Ok(tray)
}

/// Busy marker on the tray icon while a translation runs
pub struct TrayActivity {
    app: AppHandle,
}

impl TrayActivity {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn update(&self, tooltip: &str, title: Option<&str>) {
        let Some(tray) = self.app.tray_by_id(TRAY_ID) else {
            return;
        };
        if let Err(e) = tray.set_tooltip(Some(tooltip)) {
            tracing::debug!("[Tray] Failed to set tooltip: {}", e);
        }
        if let Err(e) = tray.set_title(title) {
            tracing::debug!("[Tray] Failed to set title: {}", e);
        }
    }
}

impl ActivityIndicator for TrayActivity {
    fn translation_started(&self) {
        self.update(BUSY_TOOLTIP, Some(BUSY_TITLE));
    }

    fn translation_finished(&self) {
        self.update(APP_NAME, None);
    }
}
