use core_foundation::base::TCFType;
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::string::{CFString, CFStringRef};
use tokio::process::Command;

use super::classify_osascript_failure;
use crate::shared::error::AppResult;

const COPY_SCRIPT: &str = r#"tell application "System Events" to keystroke "c" using {command down}"#;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
    static kAXTrustedCheckOptionPrompt: CFStringRef;
}

/// Check if the app has accessibility permissions
/// Uses native Accessibility API (AXIsProcessTrusted)
pub fn check_accessibility_permissions() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// Same check, but lets macOS show its "grant access" prompt
pub fn request_accessibility_permissions() -> bool {
    unsafe {
        let key = CFString::wrap_under_get_rule(kAXTrustedCheckOptionPrompt);
        let options = CFDictionary::from_CFType_pairs(&[(key, CFBoolean::true_value())]);
        AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef())
    }
}

/// Simulate Cmd+C via System Events
pub async fn simulate_copy() -> AppResult<()> {
    let output = Command::new("osascript")
        .arg("-e")
        .arg(COPY_SCRIPT)
        .output()
        .await?;

    if output.status.success() {
        tracing::debug!("[Automation] Cmd+C sent");
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    tracing::warn!("[Automation] osascript exited with {}: {}", output.status, stderr.trim());
    Err(classify_osascript_failure(&stderr))
}
