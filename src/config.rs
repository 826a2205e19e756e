use crate::error::ConfigurationError;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Gemini
    /// Resolved once at startup; `None` surfaces as a `ConfigurationError`
    /// the first time the chat page needs a model client.
    pub api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,

    // Translation
    pub translation_temperature: f32,

    // Local state
    pub preferences_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let translation_temperature = match std::env::var("TRANSLATION_TEMPERATURE") {
            Ok(raw) => raw
                .parse::<f32>()
                .with_context(|| format!("TRANSLATION_TEMPERATURE is not a number: {}", raw))?,
            Err(_) => 0.2,
        };
        if !(0.0..=2.0).contains(&translation_temperature) {
            bail!(
                "TRANSLATION_TEMPERATURE must be between 0.0 and 2.0, got {}",
                translation_temperature
            );
        }

        Ok(Self {
            // API_KEY wins, GEMINI_API_KEY is the fallback
            api_key: non_empty_var("API_KEY").or_else(|| non_empty_var("GEMINI_API_KEY")),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),

            translation_temperature,

            preferences_file: std::env::var("PREFERENCES_FILE")
                .unwrap_or_else(|_| ".support-chat/preferences.json".to_string()),
        })
    }

    /// The credential, or the fatal configuration error if none was found.
    pub fn api_key(&self) -> Result<&str, ConfigurationError> {
        self.api_key.as_deref().ok_or(ConfigurationError)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
