use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder, WindowEvent};

use crate::config::{get_window_config, window_label, SETTINGS_WINDOW};
use crate::shared::error::AppResult;

/// Show the settings window, creating it on first use.
///
/// Closing only hides it; the app lives in the menu bar.
pub fn show_settings_window(app: &AppHandle) -> AppResult<()> {
    let label = window_label(SETTINGS_WINDOW);

    if let Some(window) = app.get_webview_window(&label) {
        window.unminimize()?;
        window.show()?;
        window.set_focus()?;
        return Ok(());
    }

    let config = get_window_config(SETTINGS_WINDOW);
    let url = format!("index.html?widget={}", SETTINGS_WINDOW);
    let window = WebviewWindowBuilder::new(app, &label, WebviewUrl::App(url.into()))
        .title(&config.title)
        .inner_size(config.width, config.height)
        .resizable(config.resizable)
        .decorations(config.decorations)
        .focused(true)
        .center()
        .build()?;

    let handle = window.clone();
    window.on_window_event(move |event| {
        if let WindowEvent::CloseRequested { api, .. } = event {
            api.prevent_close();
            if let Err(e) = handle.hide() {
                tracing::warn!("[Settings] Failed to hide settings window: {}", e);
            }
        }
    });

    window.set_focus()?;
    tracing::info!("[Settings] Opened settings window");
    Ok(())
}
