use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::settings::AppSettings;
use super::types::StatusUpdate;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier frontend parsing
#[ts(export)]
pub enum AppEvent {
    #[serde(rename = "settings://updated")]
    SettingsUpdated(AppSettings),

    #[serde(rename = "status://update")]
    StatusUpdated(StatusUpdate),
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::SettingsUpdated(_) => "settings://updated",
            AppEvent::StatusUpdated(_) => "status://update",
        }
    }
}
