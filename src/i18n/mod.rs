//! Internationalization (i18n) module for multi-language chat.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales
//! - `language`: Validated `Language` handle onto a registry entry
//! - `strings`: Inline notices written into the transcript
//! - `validator`: Translation quality validation
//! - `metrics`: Translation observability
//!
//! # Example
//!
//! ```rust,ignore
//! use support_chat::i18n::{Language, LanguageRegistry};
//!
//! let spanish = Language::from_code("es-ES")?;
//! assert!(!spanish.is_working_language());
//!
//! let languages = LanguageRegistry::get().list_enabled();
//! ```

mod language;
mod metrics;
mod registry;
pub mod strings;
mod validator;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry, DEFAULT_LANGUAGE_CODE};
pub use validator::{TranslationValidator, ValidationReport};
