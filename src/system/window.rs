//! Window management
//!
//! - `position`: cursor anchoring and monitor clamping
//! - `settings`: the settings window
//! - `status`: the status toast surface

pub mod position;
pub mod settings;
pub mod status;
