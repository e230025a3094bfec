// Module declarations
mod api;
mod config;
mod core;
mod shared;
mod state;
mod system;

use std::sync::Arc;

use tauri::{AppHandle, Manager, RunEvent};
use tracing_subscriber::EnvFilter;

use crate::core::clipboard::{ClipboardAccess, SystemClipboard};
use crate::core::selection::SelectionCapture;
use crate::core::settings::SettingsService;
use crate::core::status::StatusController;
use crate::core::translator::GeminiTranslator;
use crate::core::workflow::TranslationWorkflow;
use crate::shared::emit::SettingsBroadcast;
use crate::shared::error::AppResult;
use crate::shared::settings::SettingsStore;
use crate::state::AppState;
use crate::system::automation::{self, KeystrokeCopy};
use crate::system::shortcut::{register_translation_shortcut, unregister_all_shortcuts, TauriShortcutBinder};
use crate::system::tray::{build_tray, TrayActivity};
use crate::system::window::settings::show_settings_window;
use crate::system::window::status::StatusWindow;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, re-entry) is harmless
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn build_state(app: &AppHandle) -> AppResult<AppState> {
    let store = SettingsStore::open_default()?;
    let settings = store.load().await;
    tracing::info!("[Setup] Settings loaded from {}", store.path().display());

    let translator = Arc::new(GeminiTranslator::new(config::gemini_model())?);
    tracing::info!("[Setup] Using Gemini model {}", translator.model());
    if !translator.configure(&settings.api_key) {
        tracing::warn!("[Setup] No Gemini API key configured; set one in Settings");
    }

    let clipboard: Arc<dyn ClipboardAccess> = Arc::new(SystemClipboard);
    let selection = Arc::new(SelectionCapture::new(
        clipboard.clone(),
        Arc::new(KeystrokeCopy),
        config::CLIPBOARD_SETTLE_DELAY,
    ));
    let status = Arc::new(StatusController::new(
        Arc::new(StatusWindow::new(app.clone())),
        config::STATUS_HIDE_DELAY,
    ));
    let workflow = Arc::new(TranslationWorkflow::new(
        selection,
        translator.clone(),
        clipboard,
        status.clone(),
        Arc::new(TrayActivity::new(app.clone())),
    ));

    let settings = SettingsService::new(
        settings,
        store,
        translator,
        Arc::new(TauriShortcutBinder::new(app.clone())),
        Arc::new(SettingsBroadcast::new(app.clone())),
    );

    Ok(AppState {
        settings,
        workflow,
        status,
    })
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    let app = tauri::Builder::default()
        // Must come first so a second launch never gets further
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            tracing::info!("[Setup] Second instance launched, opening settings");
            if let Err(e) = show_settings_window(app) {
                tracing::error!("[Setup] Failed to show settings: {}", e);
            }
        }))
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .setup(|app| {
            // Menu bar only, no Dock icon
            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            let handle = app.handle().clone();
            let state = tauri::async_runtime::block_on(build_state(&handle))?;
            let shortcut = tauri::async_runtime::block_on(state.settings.shortcut());
            app.manage(state);

            if !automation::check_accessibility_permissions() {
                tracing::warn!(
                    "[Setup] Accessibility permission missing; selection capture will fail until granted"
                );
                automation::request_accessibility_permissions();
            }

            build_tray(&handle)?;

            if let Err(e) = register_translation_shortcut(&handle, &shortcut) {
                tracing::error!("[Setup] {}", e);
                tracing::warn!(
                    "[Setup] Continuing without a global shortcut. Check System Settings > Keyboard > Keyboard Shortcuts for conflicts"
                );
            }

            tracing::info!("[Setup] {} ready, shortcut {}", config::APP_NAME, shortcut);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            api::commands::settings::get_settings,
            api::commands::settings::save_settings,
            api::commands::system::open_external,
            api::commands::system::check_accessibility_permissions,
            api::commands::system::is_shortcut_registered,
            api::commands::system::log_message,
        ])
        .build(tauri::generate_context!())
        .unwrap_or_else(|e| {
            tracing::error!("FATAL: Failed to start Tauri application: {}", e);
            std::process::exit(1);
        });

    app.run(|app, event| match event {
        // Closing the last window must not quit a menu bar app
        RunEvent::ExitRequested { code: None, api, .. } => api.prevent_exit(),
        RunEvent::Exit => {
            unregister_all_shortcuts(app);
            if let Some(state) = app.try_state::<AppState>() {
                state.status.destroy();
            }
            tracing::info!("[Setup] Shutdown complete");
        }
        _ => {}
    });
}
