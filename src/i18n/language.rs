//! Language type: validated handle onto a registry entry.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A validated language.
///
/// Only supported, enabled locales can be constructed, so every accessor can
/// look the entry up without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// BCP 47 locale tag (e.g., "en-US", "es-ES")
    code: &'static str,
}

impl Language {
    /// US English, the default selection.
    pub const ENGLISH: Language = Language { code: "en-US" };

    /// Castilian Spanish.
    pub const SPANISH: Language = Language { code: "es-ES" };

    /// Create a Language from a locale code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Parse a stored code, falling back to the default on anything unknown.
    pub fn from_code_or_default(code: &str) -> Language {
        Language::from_code(code).unwrap_or_default()
    }

    /// The language the model works in.
    pub fn working() -> Language {
        Language::ENGLISH
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not registered. Construction only goes through
    /// `from_code` or the constants, so this cannot happen.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Name used in translation prompts (e.g., "Spanish").
    pub fn english_name(&self) -> &'static str {
        self.config().english_name
    }

    /// Name shown in the language picker (e.g., "Español (España)").
    pub fn display_name(&self) -> &'static str {
        self.config().display_name
    }

    /// `true` if turns in this language go to the model untranslated.
    pub fn is_working_language(&self) -> bool {
        self.config().is_working_language()
    }
}

impl Default for Language {
    fn default() -> Self {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.code)
    }
}
