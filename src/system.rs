pub mod automation;
pub mod window;
pub mod tray;
pub mod shortcut;
