//! Status toast window
//!
//! A small always-on-top overlay that never takes focus, so the app the
//! user is working in keeps the keyboard.

use tauri::{AppHandle, LogicalPosition, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use super::position::{anchored_position, cursor_and_monitor};
use crate::config::{get_window_config, window_label, STATUS_CURSOR_OFFSET, STATUS_WINDOW};
use crate::core::status::StatusSurface;
use crate::shared::emit::emit_event_to;
use crate::shared::error::AppResult;
use crate::shared::events::AppEvent;
use crate::shared::types::StatusUpdate;

pub struct StatusWindow {
    app: AppHandle,
    label: String,
}

impl StatusWindow {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            label: window_label(STATUS_WINDOW),
        }
    }

    fn existing(&self) -> Option<WebviewWindow> {
        self.app.get_webview_window(&self.label)
    }

    fn target_position(&self, width: f64, height: f64) -> Option<(f64, f64)> {
        cursor_and_monitor(&self.app)
            .map(|(cursor, screen)| anchored_position(cursor, STATUS_CURSOR_OFFSET, (width, height), screen))
    }

    fn create(&self, update: &StatusUpdate) -> AppResult<()> {
        let config = get_window_config(STATUS_WINDOW);
        let url = format!(
            "index.html?widget={}&message={}&kind={}",
            STATUS_WINDOW,
            urlencoding::encode(&update.message),
            update.kind.as_str()
        );

        let mut builder = WebviewWindowBuilder::new(&self.app, &self.label, WebviewUrl::App(url.into()))
            .title(&config.title)
            .inner_size(config.width, config.height)
            .resizable(config.resizable)
            .decorations(config.decorations)
            .transparent(config.transparent)
            .always_on_top(true)
            .focused(false)
            .skip_taskbar(true)
            .visible_on_all_workspaces(true);

        builder = match self.target_position(config.width, config.height) {
            Some((x, y)) => builder.position(x, y),
            None => builder.center(),
        };

        builder.build()?;
        tracing::debug!("[Status] Created status window");
        Ok(())
    }
}

impl StatusSurface for StatusWindow {
    fn present(&self, update: &StatusUpdate) -> AppResult<()> {
        let Some(window) = self.existing() else {
            return self.create(update);
        };

        emit_event_to(&self.app, &self.label, AppEvent::StatusUpdated(update.clone()));

        let config = get_window_config(STATUS_WINDOW);
        if let Some((x, y)) = self.target_position(config.width, config.height) {
            window.set_position(LogicalPosition::new(x, y))?;
        }
        window.show()?;
        Ok(())
    }

    fn hide(&self) -> AppResult<()> {
        if let Some(window) = self.existing() {
            window.hide()?;
        }
        Ok(())
    }

    fn destroy(&self) -> AppResult<()> {
        if let Some(window) = self.existing() {
            window.destroy()?;
        }
        Ok(())
    }
}
