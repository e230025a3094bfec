//! Live settings
//!
//! Owns the in-memory settings and applies a save to everything that depends
//! on them: the global shortcut, the translator key and the open windows.
//! A save either lands completely or leaves the previous state in place.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::language::TranslationDirection;
use crate::shared::error::AppResult;
use crate::shared::settings::{AppSettings, SettingsStore, SettingsUpdate};

/// Registers the translation shortcut, replacing the current one
#[async_trait]
pub trait ShortcutBinder: Send + Sync {
    async fn bind(&self, accelerator: &str) -> AppResult<()>;
}

/// Whatever needs the API key; returns whether it is usable afterwards
pub trait ApiKeyConsumer: Send + Sync {
    fn configure(&self, stored_key: &str) -> bool;
}

/// Told about every successful save, with the key already masked
pub trait SettingsListener: Send + Sync {
    fn settings_updated(&self, masked: &AppSettings);
}

pub struct SettingsService {
    current: RwLock<AppSettings>,
    store: SettingsStore,
    translator: Arc<dyn ApiKeyConsumer>,
    shortcuts: Arc<dyn ShortcutBinder>,
    listener: Arc<dyn SettingsListener>,
}

impl SettingsService {
    pub fn new(
        initial: AppSettings,
        store: SettingsStore,
        translator: Arc<dyn ApiKeyConsumer>,
        shortcuts: Arc<dyn ShortcutBinder>,
        listener: Arc<dyn SettingsListener>,
    ) -> Self {
        Self {
            current: RwLock::new(initial),
            store,
            translator,
            shortcuts,
            listener,
        }
    }

    pub async fn masked(&self) -> AppSettings {
        self.current.read().await.masked()
    }

    pub async fn shortcut(&self) -> String {
        self.current.read().await.shortcut.clone()
    }

    pub async fn direction(&self) -> TranslationDirection {
        self.current.read().await.translation_direction
    }

    async fn restore_shortcut(&self, previous: &str) {
        if let Err(e) = self.shortcuts.bind(previous).await {
            tracing::error!("[Settings] Failed to restore shortcut '{}': {}", previous, e);
        }
    }

    /// Apply a partial update. Returns the saved settings, masked.
    pub async fn save(&self, update: SettingsUpdate) -> AppResult<AppSettings> {
        let mut current = self.current.write().await;
        let next = current.apply(update);
        let shortcut_changed = next.shortcut != current.shortcut;

        if shortcut_changed {
            if let Err(e) = self.shortcuts.bind(&next.shortcut).await {
                tracing::warn!(
                    "[Settings] Shortcut '{}' rejected, restoring '{}'",
                    next.shortcut,
                    current.shortcut
                );
                self.restore_shortcut(&current.shortcut).await;
                return Err(e);
            }
        }

        if let Err(e) = self.store.save(&next).await {
            tracing::error!("[Settings] Failed to save settings: {}", e);
            if shortcut_changed {
                self.restore_shortcut(&current.shortcut).await;
            }
            return Err(e);
        }

        if next.api_key != current.api_key {
            self.translator.configure(&next.api_key);
        }

        tracing::info!(
            "[Settings] Saved (direction {:?}, shortcut {})",
            next.translation_direction,
            next.shortcut
        );
        *current = next;

        let masked = current.masked();
        self.listener.settings_updated(&masked);
        Ok(masked)
    }
}
