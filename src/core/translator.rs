//! Translator feature
//!
//! Sends the captured text to Gemini and returns the translation.

pub mod gemini;
pub mod types;

use async_trait::async_trait;

use crate::core::language::Language;

pub use gemini::{build_prompt, GeminiTranslator};
pub use types::{TranslateError, TranslatorResult};

/// Remote translation backend
#[async_trait]
pub trait Translator: Send + Sync {
    fn is_initialized(&self) -> bool;

    async fn translate(&self, text: &str, target: Language) -> TranslatorResult<String>;
}
