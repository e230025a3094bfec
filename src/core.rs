pub mod language;
pub mod translator;
pub mod clipboard;
pub mod selection;
pub mod settings;
pub mod status;
pub mod workflow;
