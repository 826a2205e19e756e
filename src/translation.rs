use crate::error::TranslationError;
use crate::gateway::ModelGateway;
use crate::i18n::{TranslationMetrics, TranslationValidator};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default sampling temperature for translation calls
pub const DEFAULT_TRANSLATION_TEMPERATURE: f32 = 0.2;

/// Build the one-shot translation prompt.
///
/// Languages are named by their English names, never by locale code.
fn build_translation_prompt(text: &str, source_language: &str, target_language: &str) -> String {
    format!(
        r#"Translate the following text from {} to {}.
IMPORTANT: Respond ONLY with the translated text and nothing else. Do not add any introductory phrases, explanations, or any text other than the direct translation.

Text to translate:
"{}""#,
        source_language, target_language, text
    )
}

/// Stateless translation on top of the chat model.
#[derive(Clone)]
pub struct Translator {
    gateway: Arc<dyn ModelGateway>,
    temperature: f32,
    metrics: Arc<TranslationMetrics>,
}

impl Translator {
    pub fn new(gateway: Arc<dyn ModelGateway>, temperature: f32) -> Self {
        Self {
            gateway,
            temperature,
            metrics: Arc::new(TranslationMetrics::new()),
        }
    }

    pub fn metrics(&self) -> &Arc<TranslationMetrics> {
        &self.metrics
    }

    /// Translate `text` between two languages given by English name.
    ///
    /// One model call, no retry. The caller decides what to show on failure.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let prompt = build_translation_prompt(text, source_language, target_language);

        self.metrics.record_api_call();
        let translated = match self.gateway.generate(&prompt, self.temperature).await {
            Ok(reply) => reply.trim().to_string(),
            Err(source) => {
                self.metrics.record_api_failure();
                warn!(
                    "Translation from {} to {} failed: {}",
                    source_language, target_language, source
                );
                return Err(TranslationError {
                    source,
                    original_text: text.to_string(),
                });
            }
        };

        let validation = TranslationValidator::validate(text, &translated);
        if validation.has_warnings() {
            warn!(
                "Translation validation warnings ({} -> {}): {:?}",
                source_language, target_language, validation.warnings
            );
        }

        debug!(
            "Translated {} chars from {} to {}",
            text.chars().count(),
            source_language,
            target_language
        );

        Ok(translated)
    }
}
