//! Japanese/English detection and translation direction

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Language {
    Japanese,
    English,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Japanese => "Japanese",
            Language::English => "English",
        }
    }

    /// Short label used in the status toast
    pub fn short_code(&self) -> &'static str {
        match self {
            Language::Japanese => "JP",
            Language::English => "EN",
        }
    }
}

/// User preference for which way to translate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TranslationDirection {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "en-to-ja")]
    EnToJa,
    #[serde(rename = "ja-to-en")]
    JaToEn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

/// Hiragana, Katakana and common Kanji
fn japanese_pattern() -> &'static Regex {
    static JAPANESE_REGEX: OnceLock<Regex> = OnceLock::new();
    JAPANESE_REGEX.get_or_init(|| Regex::new(r"[ぁ-んァ-ン一-龥]").expect("valid japanese regex"))
}

pub fn contains_japanese(text: &str) -> bool {
    japanese_pattern().is_match(text)
}

pub fn detect_language(text: &str) -> Language {
    if contains_japanese(text) {
        Language::Japanese
    } else {
        Language::English
    }
}

/// An explicit preference always wins over detection
pub fn resolve_direction(text: &str, preference: TranslationDirection) -> LanguagePair {
    match preference {
        TranslationDirection::EnToJa => LanguagePair {
            source: Language::English,
            target: Language::Japanese,
        },
        TranslationDirection::JaToEn => LanguagePair {
            source: Language::Japanese,
            target: Language::English,
        },
        TranslationDirection::Auto => match detect_language(text) {
            Language::Japanese => LanguagePair {
                source: Language::Japanese,
                target: Language::English,
            },
            Language::English => LanguagePair {
                source: Language::English,
                target: Language::Japanese,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_script() {
        assert!(contains_japanese("ひらがな"));
        assert!(contains_japanese("カタカナ"));
        assert!(contains_japanese("漢字"));
        assert!(contains_japanese("Hello 世界"));
    }

    #[test]
    fn test_latin_and_other_scripts_are_english() {
        assert_eq!(detect_language("Hello world"), Language::English);
        assert_eq!(detect_language("안녕하세요"), Language::English);
        assert_eq!(detect_language(""), Language::English);
    }

    #[test]
    fn test_auto_direction_follows_detection() {
        let pair = resolve_direction("こんにちは", TranslationDirection::Auto);
        assert_eq!(pair.source, Language::Japanese);
        assert_eq!(pair.target, Language::English);

        let pair = resolve_direction("Good morning", TranslationDirection::Auto);
        assert_eq!(pair.source, Language::English);
        assert_eq!(pair.target, Language::Japanese);
    }

    #[test]
    fn test_explicit_direction_ignores_content() {
        let pair = resolve_direction("こんにちは", TranslationDirection::EnToJa);
        assert_eq!(pair.target, Language::Japanese);

        let pair = resolve_direction("Good morning", TranslationDirection::JaToEn);
        assert_eq!(pair.target, Language::English);
    }

    #[test]
    fn test_direction_wire_names() {
        let parsed: TranslationDirection = serde_json::from_str("\"ja-to-en\"").unwrap();
        assert_eq!(parsed, TranslationDirection::JaToEn);
        assert_eq!(serde_json::to_string(&TranslationDirection::Auto).unwrap(), "\"auto\"");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Language::Japanese.display_name(), "Japanese");
        assert_eq!(Language::English.short_code(), "EN");
    }
}
