use serde::Serialize;
use thiserror::Error;

use crate::core::translator::TranslateError;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("System Error: {0}")]
    System(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Clipboard Error: {0}")]
    Clipboard(String),

    #[error("Settings Error: {0}")]
    Settings(String),

    #[error("Shortcut Error: {0}")]
    Shortcut(String),

    #[error("Window Error: {0}")]
    Window(String),

    /// Accessibility permissions denied
    #[error("Accessibility permissions denied. Please enable in System Settings > Privacy & Security > Accessibility.")]
    AccessibilityDenied,

    #[error("{0}")]
    Translation(#[from] TranslateError),

    #[error("Unknown Error: {0}")]
    Unknown(String),
}

// Implement conversion from standard errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Serialization error: {}", err))
    }
}

impl From<tauri::Error> for AppError {
    fn from(err: tauri::Error) -> Self {
        AppError::Window(err.to_string())
    }
}

impl From<keyring::Error> for AppError {
    fn from(err: keyring::Error) -> Self {
        AppError::Settings(format!("Keyring error: {}", err))
    }
}

// Helper for Tauri Result
pub type AppResult<T> = Result<T, AppError>;
