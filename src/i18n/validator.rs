//! Translation quality validation.
//!
//! Support replies carry contact details and meeting times that must survive
//! a round trip through the model untouched. The validator never rejects a
//! translation; it only reports what looks lost so the caller can log it.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing warnings about a translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Non-critical warnings about potential issues
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_warnings()
    }
}

/// Validator for translation quality.
pub struct TranslationValidator;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Check that URLs, e-mail addresses and numbers from `original` are all
    /// present in `translated`.
    ///
    /// Order is ignored since target languages may restructure sentences.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        let checks: [(&str, fn(&str) -> Vec<String>); 3] = [
            ("URL", Self::extract_urls),
            ("E-mail", Self::extract_emails),
            ("Number", Self::extract_numbers),
        ];

        for (label, extract) in checks {
            let mut expected = extract(original);
            let mut actual = extract(translated);
            expected.sort();
            actual.sort();
            if expected != actual {
                report.warnings.push(format!(
                    "{} mismatch: original has {:?}, translation has {:?}",
                    label, expected, actual
                ));
            }
        }

        report
    }

    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| {
            Regex::new(r#"https?://[^\s)\]"]+|www\.[a-zA-Z0-9-]+\.[^\s)\]"]+"#)
                .expect("URL pattern is valid")
        });

        regex
            .find_iter(text)
            .map(|m| m.as_str().trim_end_matches(['.', ',']).to_string())
            .collect()
    }

    fn extract_emails(text: &str) -> Vec<String> {
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                .expect("E-mail pattern is valid")
        });

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// ASCII digit groups only; scripts with native numerals are expected to
    /// show up as warnings and that is acceptable for a log line.
    fn extract_numbers(text: &str) -> Vec<String> {
        let regex =
            NUMBER_REGEX.get_or_init(|| Regex::new(r"\d+").expect("Number pattern is valid"));

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
