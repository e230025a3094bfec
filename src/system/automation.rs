//! Automation module for macOS system integration
//!
//! Simulated Cmd+C for selection capture and the accessibility permission
//! checks it depends on.

#[cfg(target_os = "macos")]
pub mod macos;

use async_trait::async_trait;

use crate::core::selection::CopyTrigger;
use crate::shared::error::{AppError, AppResult};

#[cfg(target_os = "macos")]
pub use macos::{check_accessibility_permissions, request_accessibility_permissions, simulate_copy};

/// osascript stderr when the app is missing from the Accessibility list
const ASSISTIVE_ACCESS_DENIED: &str = "not allowed assistive access";

/// Map a failed osascript run onto an application error
pub(crate) fn classify_osascript_failure(stderr: &str) -> AppError {
    if stderr.contains(ASSISTIVE_ACCESS_DENIED) {
        AppError::AccessibilityDenied
    } else {
        let detail = stderr.trim();
        AppError::System(if detail.is_empty() {
            "osascript failed".to_string()
        } else {
            format!("osascript failed: {}", detail)
        })
    }
}

/// Copy trigger that sends Cmd+C to the frontmost app
#[derive(Debug, Default, Clone, Copy)]
pub struct KeystrokeCopy;

#[async_trait]
impl CopyTrigger for KeystrokeCopy {
    async fn trigger_copy(&self) -> AppResult<()> {
        simulate_copy().await
    }
}

// Stub implementations for non-macOS platforms
#[cfg(not(target_os = "macos"))]
pub async fn simulate_copy() -> AppResult<()> {
    Err(AppError::System("Not supported on this platform".to_string()))
}

#[cfg(not(target_os = "macos"))]
pub fn check_accessibility_permissions() -> bool {
    true
}

#[cfg(not(target_os = "macos"))]
pub fn request_accessibility_permissions() -> bool {
    true
}
