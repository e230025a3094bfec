use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use directories::ProjectDirs;
use keyring::Entry;
use serde::{Deserialize, Serialize};
use tokio::fs;
use ts_rs::TS;

use crate::config::{DEFAULT_SHORTCUT, KEYRING_SERVICE, SETTINGS_FILE_NAME};
use crate::core::language::TranslationDirection;
use crate::shared::error::{AppError, AppResult};

/// Placeholder sent to the frontend instead of the real API key
pub const MASKED_SECRET: &str = "********";

const API_KEY_ACCOUNT: &str = "gemini_api_key";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct AppSettings {
    pub api_key: String,
    pub translation_direction: TranslationDirection,
    pub shortcut: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            translation_direction: TranslationDirection::Auto,
            shortcut: DEFAULT_SHORTCUT.to_string(),
        }
    }
}

/// Partial update coming from the settings form
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub translation_direction: Option<TranslationDirection>,
    pub shortcut: Option<String>,
}

impl AppSettings {
    /// Merge a partial update. A masked key keeps the current one.
    pub fn apply(&self, update: SettingsUpdate) -> AppSettings {
        let mut next = self.clone();
        if let Some(api_key) = update.api_key {
            if api_key != MASKED_SECRET {
                next.api_key = api_key.trim().to_string();
            }
        }
        if let Some(direction) = update.translation_direction {
            next.translation_direction = direction;
        }
        if let Some(shortcut) = update.shortcut {
            next.shortcut = shortcut.trim().to_string();
        }
        next
    }

    /// Return a copy of settings with secrets masked (for frontend/logging)
    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        if !copy.api_key.is_empty() {
            copy.api_key = MASKED_SECRET.to_string();
        }
        copy
    }
}

/// Secret storage seam; the API key never touches the settings file
pub trait SecretStore: Send + Sync {
    fn get(&self, account: &str) -> AppResult<Option<String>>;
    fn set(&self, account: &str, value: &str) -> AppResult<()>;
    fn delete(&self, account: &str) -> AppResult<()>;
}

/// OS keychain backed secret store
pub struct KeyringSecretStore {
    service: String,
}

impl KeyringSecretStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self { service: service.into() }
    }
}

impl SecretStore for KeyringSecretStore {
    fn get(&self, account: &str) -> AppResult<Option<String>> {
        let entry = Entry::new(&self.service, account)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, account: &str, value: &str) -> AppResult<()> {
        let entry = Entry::new(&self.service, account)?;
        entry.set_password(value)?;
        Ok(())
    }

    fn delete(&self, account: &str) -> AppResult<()> {
        let entry = Entry::new(&self.service, account)?;
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// JSON settings file plus keyring-held API key
pub struct SettingsStore {
    path: PathBuf,
    secrets: Arc<dyn SecretStore>,
    /// False while the keyring could not be read; an empty key then means
    /// "unknown", never "delete"
    secret_known: AtomicBool,
}

/// Field-by-field read so one bad value only resets that field
fn parse_settings_file(content: &str) -> AppSettings {
    let mut settings = AppSettings::default();

    let fields = match serde_json::from_str::<serde_json::Value>(content) {
        Ok(serde_json::Value::Object(fields)) => fields,
        Ok(_) => {
            tracing::warn!("[Settings] Settings file is not a JSON object, using defaults");
            return settings;
        }
        Err(e) => {
            tracing::warn!("[Settings] Failed to parse settings file, using defaults: {}", e);
            return settings;
        }
    };

    if let Some(value) = fields.get("translation_direction") {
        match serde_json::from_value::<TranslationDirection>(value.clone()) {
            Ok(direction) => settings.translation_direction = direction,
            Err(e) => tracing::warn!("[Settings] Ignoring translation_direction {}: {}", value, e),
        }
    }

    match fields.get("shortcut").map(|value| value.as_str()) {
        Some(Some(shortcut)) if !shortcut.trim().is_empty() => {
            settings.shortcut = shortcut.trim().to_string();
        }
        Some(_) => tracing::warn!("[Settings] Ignoring invalid shortcut value"),
        None => {}
    }

    settings
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>, secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            path: path.into(),
            secrets,
            secret_known: AtomicBool::new(true),
        }
    }

    /// Store in the platform config directory, secrets in the OS keychain
    pub fn open_default() -> AppResult<Self> {
        Ok(Self::new(
            Self::default_path()?,
            Arc::new(KeyringSecretStore::new(KEYRING_SERVICE)),
        ))
    }

    pub fn default_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "gemini-translation", "gemini-translation")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
            .ok_or_else(|| AppError::Settings("Failed to determine config directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Option<String> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("[Settings] Failed to read settings file, using defaults: {}", e);
                None
            }
        }
    }

    /// Load settings. A missing or damaged file yields defaults for the
    /// affected fields; the API key is read from the keyring regardless.
    pub async fn load(&self) -> AppSettings {
        let mut settings = match self.read_file().await {
            Some(content) => parse_settings_file(&content),
            None => AppSettings::default(),
        };

        match self.secrets.get(API_KEY_ACCOUNT) {
            Ok(key) => {
                settings.api_key = key.unwrap_or_default();
                self.secret_known.store(true, Ordering::Release);
            }
            Err(e) => {
                tracing::warn!("[Settings] Could not read API key from keyring: {}", e);
                settings.api_key.clear();
                self.secret_known.store(false, Ordering::Release);
            }
        }

        settings
    }

    async fn write_file(&self, settings: &AppSettings) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Settings(format!("Failed to create config directory: {}", e)))?;
        }

        let mut disk_copy = settings.clone();
        disk_copy.api_key.clear();

        let content = serde_json::to_string_pretty(&disk_copy)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::Settings(format!("Failed to write settings file: {}", e)))
    }

    async fn restore_file(&self, previous: Option<String>) {
        let result = match previous {
            Some(content) => fs::write(&self.path, content).await,
            None => fs::remove_file(&self.path).await,
        };
        if let Err(e) = result {
            tracing::error!("[Settings] Failed to restore settings file: {}", e);
        }
    }

    fn write_secret(&self, api_key: &str) -> AppResult<()> {
        if !api_key.is_empty() {
            self.secrets.set(API_KEY_ACCOUNT, api_key)?;
            self.secret_known.store(true, Ordering::Release);
        } else if self.secret_known.load(Ordering::Acquire) {
            self.secrets.delete(API_KEY_ACCOUNT)?;
        } else {
            tracing::warn!("[Settings] Keyring was unreadable at load, keeping stored API key");
        }
        Ok(())
    }

    /// Persist settings: the file first, then the keyring. A keyring
    /// failure puts the previous file back, so a failed save changes nothing.
    pub async fn save(&self, settings: &AppSettings) -> AppResult<()> {
        let previous = fs::read_to_string(&self.path).await.ok();

        self.write_file(settings).await?;

        if let Err(e) = self.write_secret(&settings.api_key) {
            tracing::error!("[Settings] Failed to store API key: {}", e);
            self.restore_file(previous).await;
            return Err(e);
        }
        Ok(())
    }
}
