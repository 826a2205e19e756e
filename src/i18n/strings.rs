//! Inline notices the orchestrator writes into the transcript.
//!
//! These are authored in English on purpose: they are shown exactly when
//! translation is unavailable, so they cannot themselves depend on it. The
//! language they mention is always the English name from the registry.

/// Appended to a reply that could not be translated back.
pub fn reply_not_translated_notice(language_name: &str) -> String {
    format!(
        " (Note: Translation to {} failed. Displaying in English.)",
        language_name
    )
}

/// Prepended to a reply whose question could not be translated for the model.
pub fn input_not_understood_notice(language_name: &str) -> String {
    format!(
        "(Note: There was an issue understanding your input in {}. I'll try my best based on the original.)\n\n",
        language_name
    )
}

/// Appended to the English greeting when re-translating it failed.
pub fn greeting_not_translated_notice(language_name: &str) -> String {
    format!(" (Translation to {} failed)", language_name)
}

/// Bot-authored transcript entry for a failed model turn.
pub fn chat_error_reply(error: &str) -> String {
    format!("Sorry, something went wrong: {}", error)
}

/// Session banner for a failed model turn.
pub fn chat_error_banner(error: &str) -> String {
    format!("Failed to get response: {}", error)
}

/// Blocking message for a failed chat initialization.
pub fn init_error_banner(error: &str) -> String {
    format!(
        "Failed to initialize chatbot: {}. Please ensure API_KEY is correctly configured and try again.",
        error
    )
}
