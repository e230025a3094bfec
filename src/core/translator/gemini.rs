use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::types::{
    ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse, TranslateError,
    TranslatorResult,
};
use super::Translator;
use crate::config::{resolve_api_key, GEMINI_BASE_URL, GEMINI_REQUEST_TIMEOUT};
use crate::core::language::Language;
use crate::core::settings::ApiKeyConsumer;
use crate::shared::error::{AppError, AppResult};

pub struct GeminiTranslator {
    http: Client,
    base_url: String,
    model: String,
    api_key: RwLock<Option<String>>,
}

impl GeminiTranslator {
    pub fn new(model: impl Into<String>) -> AppResult<Self> {
        Self::with_base_url(GEMINI_BASE_URL, model)
    }

    pub fn with_base_url(base_url: impl Into<String>, model: impl Into<String>) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("gemini-translation/", env!("CARGO_PKG_VERSION")))
            .timeout(GEMINI_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: RwLock::new(None),
        })
    }

    /// Set (or replace) the API key
    pub fn initialize(&self, api_key: &str) {
        let mut guard = self.api_key.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(api_key.trim().to_string()).filter(|k| !k.is_empty());
        tracing::info!("[Gemini] Translator initialized (model {})", self.model);
    }

    pub fn reset(&self) {
        let mut guard = self.api_key.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
        tracing::info!("[Gemini] Translator reset, no API key");
    }

    /// Stored key, else the env fallback; no key at all resets.
    /// Returns whether the translator ended up initialized.
    pub fn configure(&self, stored_key: &str) -> bool {
        match resolve_api_key(stored_key) {
            Some(key) => {
                self.initialize(&key);
                true
            }
            None => {
                self.reset();
                false
            }
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Option<String> {
        self.api_key
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

pub fn build_prompt(text: &str, target: Language) -> String {
    format!(
        "You are a professional translator.\n\
         Translate the following text to {}.\n\
         Output only the translated text without any explanations or additional comments.\n\
         \n\
         SOURCE:\n\
         {}",
        target.display_name(),
        text
    )
}

/// Map a non-success API reply onto a user-facing error
pub(crate) fn classify_api_error(status: StatusCode, api_status: Option<&str>, message: &str) -> TranslateError {
    let lowered = message.to_lowercase();
    if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || lowered.contains("api key")
    {
        TranslateError::InvalidApiKey
    } else if status == StatusCode::TOO_MANY_REQUESTS
        || api_status == Some("RESOURCE_EXHAUSTED")
        || lowered.contains("quota")
    {
        TranslateError::QuotaExceeded
    } else if message.is_empty() {
        TranslateError::failed(status.canonical_reason().unwrap_or_default())
    } else {
        TranslateError::failed(message)
    }
}

fn classify_transport_error(err: &reqwest::Error) -> TranslateError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        TranslateError::Network
    } else {
        TranslateError::failed(err.to_string())
    }
}

impl ApiKeyConsumer for GeminiTranslator {
    fn configure(&self, stored_key: &str) -> bool {
        GeminiTranslator::configure(self, stored_key)
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    fn is_initialized(&self) -> bool {
        self.api_key().is_some()
    }

    async fn translate(&self, text: &str, target: Language) -> TranslatorResult<String> {
        let api_key = self.api_key().ok_or(TranslateError::NotInitialized)?;
        let body = GenerateContentRequest::user_prompt(build_prompt(text, target));

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("[Gemini] Request failed: {}", e);
                classify_transport_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let (api_status, message) = match serde_json::from_str::<ApiErrorEnvelope>(&raw) {
                Ok(envelope) => (envelope.error.status, envelope.error.message),
                Err(_) => (None, raw.trim().to_string()),
            };
            tracing::error!("[Gemini] API error {}: {}", status, message);
            return Err(classify_api_error(status, api_status.as_deref(), &message));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("[Gemini] Failed to parse response: {}", e);
            TranslateError::failed(format!("Failed to parse Gemini response: {}", e))
        })?;

        match parsed.first_text() {
            Some(translated) => Ok(translated.trim().to_string()),
            None => Err(TranslateError::failed(parsed.empty_reason())),
        }
    }
}
