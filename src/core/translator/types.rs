use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Translation failures, worded for the user
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum TranslateError {
    #[error("Gemini translator is not initialized. Please set an API key.")]
    NotInitialized,

    #[error("Invalid API key. Please check your Gemini API key in settings.")]
    InvalidApiKey,

    #[error("API quota exceeded. Please check your Gemini API usage.")]
    QuotaExceeded,

    #[error("Network error. Please check your internet connection.")]
    Network,

    #[error("Translation failed: {0}")]
    Failed(String),
}

impl TranslateError {
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            TranslateError::Failed("Unknown error".to_string())
        } else {
            TranslateError::Failed(message)
        }
    }
}

pub type TranslatorResult<T> = Result<T, TranslateError>;

// generateContent wire format

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    pub status: Option<String>,
}

impl GenerateContentRequest {
    pub fn user_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Explain why no text came back
    pub fn empty_reason(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("request blocked ({})", reason);
        }
        match self.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
            Some(reason) => format!("empty response (finish reason {})", reason),
            None => "empty response".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(GenerateContentRequest::user_prompt("hi".to_string())).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }] })
        );
    }

    #[test]
    fn test_first_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] } }]
        }))
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_blocked_prompt_reason() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert_eq!(response.first_text(), None);
        assert_eq!(response.empty_reason(), "request blocked (SAFETY)");
    }

    #[test]
    fn test_failed_without_message() {
        assert_eq!(
            TranslateError::failed("  ").to_string(),
            "Translation failed: Unknown error"
        );
    }
}
