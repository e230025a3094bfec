//! Tauri command handlers
//!
//! - `settings`: settings read/save, translator and shortcut re-binding
//! - `system`: accessibility, shortcut status, external links, frontend logging

pub mod settings;
pub mod system;
