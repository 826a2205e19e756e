//! Error taxonomy for the chat client.
//!
//! Only configuration and initialization failures block the chat page.
//! Everything that can go wrong during a turn is rendered inline and the
//! session stays interactive.

use thiserror::Error;

/// Failure talking to the hosted model.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection, TLS or body decoding failure
    #[error("model API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("model API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The API answered 2xx but the body carried no text
    #[error("model response contained no text")]
    EmptyResponse,
}

/// No API key could be resolved at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("API_KEY is not configured. AI services cannot function.")]
pub struct ConfigurationError;

/// A one-shot translation call failed.
///
/// The original text is echoed so the log line is useful on its own.
#[derive(Debug, Error)]
#[error("Translation service failed: {source}. Original text: \"{original_text}\"")]
pub struct TranslationError {
    #[source]
    pub source: GatewayError,
    pub original_text: String,
}

/// A conversation turn could not be completed.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ChatError(#[from] pub GatewayError);

/// The chat page could not be entered.
///
/// Only opening the conversation can fail here; a greeting that cannot be
/// translated is shown in English instead.
#[derive(Debug, Error)]
pub enum ConversationInitError {
    #[error("could not create conversation: {0}")]
    Conversation(#[source] GatewayError),
}

/// Rejected login form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Please enter both username and password.")]
    MissingCredentials,
}
