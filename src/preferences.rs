//! Durable user preferences: theme, language and the demo username.
//!
//! Stored as a small camelCase JSON document. A missing or unreadable file
//! is never fatal; the app starts from defaults and overwrites it on the
//! next change.

use crate::i18n::{Language, DEFAULT_LANGUAGE_CODE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub selected_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            selected_language: DEFAULT_LANGUAGE_CODE.to_string(),
            current_user: None,
        }
    }
}

impl Preferences {
    /// The stored language, or the default when it is unknown or disabled.
    pub fn language(&self) -> Language {
        Language::from_code_or_default(&self.selected_language)
    }
}

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences, falling back to defaults on any problem.
    pub fn load(&self) -> Preferences {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preferences at {}; using defaults", self.path.display());
                return Preferences::default();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return Preferences::default();
            }
        };

        let mut preferences: Preferences = match serde_json::from_str(&raw) {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!("Ignoring corrupt preferences in {}: {}", self.path.display(), e);
                return Preferences::default();
            }
        };

        let language = preferences.language();
        if language.code() != preferences.selected_language {
            warn!(
                "Stored language {:?} is not available; using {}",
                preferences.selected_language,
                language.code()
            );
            preferences.selected_language = language.code().to_string();
        }
        if preferences
            .current_user
            .as_deref()
            .is_some_and(|user| user.trim().is_empty())
        {
            preferences.current_user = None;
        }

        preferences
    }

    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(preferences)
            .context("Failed to serialize preferences")?;
        // Readers see either the previous document or the new one, never a partial write
        let staging = self.staging_path();
        fs::write(&staging, json)
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
