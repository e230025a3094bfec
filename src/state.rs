use std::sync::Arc;

use crate::core::settings::SettingsService;
use crate::core::status::StatusController;
use crate::core::workflow::TranslationWorkflow;

/// Everything the shortcut handler and IPC commands share
pub struct AppState {
    pub settings: SettingsService,
    pub workflow: Arc<TranslationWorkflow>,
    pub status: Arc<StatusController>,
}
