use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Outcome of one shortcut-triggered translation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TranslationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationResult {
    pub fn translated(original: String, translated: String) -> Self {
        Self {
            success: true,
            original_text: Some(original),
            translated_text: Some(translated),
            error: None,
        }
    }

    pub fn failed(original: Option<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            original_text: original,
            translated_text: None,
            error: Some(error.into()),
        }
    }
}

/// Visual state of the status toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum StatusKind {
    Translating,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Translating => "translating",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }

    /// Terminal states disappear on their own
    pub fn auto_hides(&self) -> bool {
        !matches!(self, StatusKind::Translating)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusUpdate {
    pub message: String,
    pub kind: StatusKind,
}

impl StatusUpdate {
    pub fn new(message: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaveSettingsResponse {
    pub success: bool,
}
