//! Conversation orchestration: the translate-in, model turn, translate-out
//! pipeline behind every chat message, plus the session lifecycle around it.
//!
//! Only a model failure ends a turn early. Either translation step may fail
//! on its own; the turn then carries on with untranslated text and the reply
//! says so inline.

use crate::content;
use crate::error::{ChatError, ConversationInitError};
use crate::gateway::{ChatSession, ModelGateway};
use crate::i18n::{strings, Language, MetricsReport};
use crate::translation::{Translator, DEFAULT_TRANSLATION_TEMPERATURE};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. Never edited after it is appended, except the
/// greeting which is swapped out wholesale on a language change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Locale of `text`, stamped when the turn started
    pub language_code: String,
    /// Untranslated model output, for replies produced in another language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    pub is_greeting: bool,
}

impl ChatMessage {
    fn new(text: String, sender: Sender, language: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            sender,
            timestamp: Utc::now(),
            language_code: language.code().to_string(),
            original_text: None,
            is_greeting: false,
        }
    }

    fn user(text: &str, language: Language) -> Self {
        Self::new(text.to_string(), Sender::User, language)
    }

    fn bot(text: String, language: Language, original_text: Option<String>) -> Self {
        Self {
            original_text,
            ..Self::new(text, Sender::Bot, language)
        }
    }

    fn greeting(text: String, language: Language) -> Self {
        Self {
            is_greeting: true,
            ..Self::new(text, Sender::Bot, language)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Initializing,
    Ready,
    Sending,
    Errored,
}

/// What became of a send request.
#[derive(Debug)]
pub enum TurnOutcome {
    /// Blank input, a turn already in flight, or chat not ready
    Ignored,
    Answered(ChatMessage),
    /// The model call failed; `reply` is the inline error already appended
    Failed { reply: ChatMessage, error: ChatError },
    /// The session was reset before the reply arrived; nothing was appended
    Abandoned,
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub system_instruction: String,
    /// English source of the greeting
    pub greeting: String,
    pub translation_temperature: f32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            system_instruction: content::system_instruction(),
            greeting: content::INITIAL_GREETING.to_string(),
            translation_temperature: DEFAULT_TRANSLATION_TEMPERATURE,
        }
    }
}

struct SessionState {
    phase: SessionPhase,
    transcript: Vec<ChatMessage>,
    language: Language,
    pending_input: String,
    error: Option<String>,
    /// Bumped on every reset so late results from the old session are dropped
    epoch: u64,
}

pub struct ChatOrchestrator {
    session: ChatSession,
    translator: Translator,
    greeting: String,
    state: Mutex<SessionState>,
}

impl ChatOrchestrator {
    pub fn new(gateway: Arc<dyn ModelGateway>, config: OrchestratorConfig, language: Language) -> Self {
        Self {
            session: ChatSession::new(gateway.clone(), config.system_instruction),
            translator: Translator::new(gateway, config.translation_temperature),
            greeting: config.greeting,
            state: Mutex::new(SessionState {
                phase: SessionPhase::Uninitialized,
                transcript: Vec::new(),
                language,
                pending_input: String::new(),
                error: None,
                epoch: 0,
            }),
        }
    }

    // ==================== Lifecycle ====================

    /// Open the conversation and post the greeting in the selected language.
    ///
    /// Does nothing unless the session is uninitialized or errored, so it is
    /// safe to call every time the chat page is shown.
    pub async fn initialize(&self) -> Result<(), ConversationInitError> {
        let (language, epoch) = {
            let mut state = self.state.lock().await;
            if !matches!(
                state.phase,
                SessionPhase::Uninitialized | SessionPhase::Errored
            ) {
                return Ok(());
            }
            state.phase = SessionPhase::Initializing;
            state.error = None;
            (state.language, state.epoch)
        };

        info!("Initializing chat session in {}", language.code());
        let result = self.open_session(language).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            debug!("Session reset during initialization; ignoring result");
            return Ok(());
        }

        match result {
            Ok(greeting) => {
                state.transcript = vec![greeting];
                state.phase = SessionPhase::Ready;
                let current = state.language;
                drop(state);

                // Language switched while the greeting was being translated
                if current != language {
                    self.refresh_greeting(current).await;
                }
                info!("Chat session ready");
                Ok(())
            }
            Err(e) => {
                error!("Chat initialization failed: {}", e);
                state.phase = SessionPhase::Errored;
                state.transcript.clear();
                state.error = Some(strings::init_error_banner(&e.to_string()));
                Err(e)
            }
        }
    }

    async fn open_session(&self, language: Language) -> Result<ChatMessage, ConversationInitError> {
        self.session
            .create_conversation()
            .await
            .map_err(ConversationInitError::Conversation)?;

        let text = self.greeting_in(language).await;
        Ok(ChatMessage::greeting(text, language))
    }

    /// The greeting in `language`. A failed translation falls back to the
    /// English source with a note; it never blocks the session.
    async fn greeting_in(&self, language: Language) -> String {
        if language.is_working_language() {
            return self.greeting.clone();
        }

        match self
            .translator
            .translate(
                &self.greeting,
                Language::working().english_name(),
                language.english_name(),
            )
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Showing untranslated greeting: {}", e);
                format!(
                    "{}{}",
                    self.greeting,
                    strings::greeting_not_translated_notice(language.english_name())
                )
            }
        }
    }

    /// Back to `Uninitialized`: transcript, banner and conversation are gone.
    /// The selected language is a preference and survives.
    pub async fn reset(&self) {
        {
            let mut state = self.state.lock().await;
            state.phase = SessionPhase::Uninitialized;
            state.transcript.clear();
            state.pending_input.clear();
            state.error = None;
            state.epoch += 1;
        }
        self.session.clear().await;
        info!("Chat session reset");
    }

    // ==================== Language ====================

    /// Switch the session language.
    ///
    /// Messages already in the transcript keep their language, except the
    /// greeting, which is re-translated and replaced in place.
    pub async fn change_language(&self, code: &str) -> anyhow::Result<Language> {
        let language = Language::from_code(code)?;

        let greeting_shown = {
            let mut state = self.state.lock().await;
            if state.language == language {
                return Ok(language);
            }
            state.language = language;
            matches!(state.phase, SessionPhase::Ready | SessionPhase::Sending)
                && state.transcript.first().is_some_and(|m| m.is_greeting)
        };

        info!("Language changed to {}", language.code());
        if greeting_shown {
            self.refresh_greeting(language).await;
        }
        Ok(language)
    }

    async fn refresh_greeting(&self, language: Language) {
        let text = self.greeting_in(language).await;

        let mut state = self.state.lock().await;
        if state.language != language {
            debug!("Greeting for {} superseded by a later change", language.code());
            return;
        }
        if let Some(first) = state.transcript.first_mut() {
            if first.is_greeting {
                *first = ChatMessage::greeting(text, language);
            }
        }
    }

    // ==================== Turns ====================

    /// Send whatever is in the pending-input slot.
    pub async fn send_pending(&self) -> TurnOutcome {
        let text = self.state.lock().await.pending_input.clone();
        self.send_message(&text).await
    }

    /// Run one turn for `text`.
    ///
    /// At most one turn is in flight; a send while another is outstanding is
    /// dropped, not queued.
    pub async fn send_message(&self, text: &str) -> TurnOutcome {
        let (language, epoch) = {
            let mut state = self.state.lock().await;
            if text.trim().is_empty() || state.phase != SessionPhase::Ready {
                debug!("Ignoring send in phase {:?}", state.phase);
                return TurnOutcome::Ignored;
            }
            let language = state.language;
            state.transcript.push(ChatMessage::user(text, language));
            state.pending_input.clear();
            state.error = None;
            state.phase = SessionPhase::Sending;
            (language, state.epoch)
        };

        let result = self.run_turn(text, language).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            info!("Session reset while a turn was in flight; discarding reply");
            return TurnOutcome::Abandoned;
        }
        state.phase = SessionPhase::Ready;

        match result {
            Ok(reply) => {
                state.transcript.push(reply.clone());
                TurnOutcome::Answered(reply)
            }
            Err(chat_error) => {
                let message = chat_error.to_string();
                error!("Chat turn failed: {}", message);
                let reply = ChatMessage::bot(strings::chat_error_reply(&message), language, None);
                state.transcript.push(reply.clone());
                state.error = Some(strings::chat_error_banner(&message));
                TurnOutcome::Failed {
                    reply,
                    error: chat_error,
                }
            }
        }
    }

    async fn run_turn(&self, text: &str, language: Language) -> Result<ChatMessage, ChatError> {
        let translating = !language.is_working_language();
        let user_language = language.english_name();
        let working_language = Language::working().english_name();

        let mut input_not_understood = false;
        let outbound = if translating {
            match self
                .translator
                .translate(text, user_language, working_language)
                .await
            {
                Ok(translated) => translated,
                Err(e) => {
                    warn!("Sending untranslated input: {}", e);
                    self.translator.metrics().record_inbound_fallback();
                    input_not_understood = true;
                    text.to_string()
                }
            }
        } else {
            text.to_string()
        };

        let raw_reply = self.session.send_turn(&outbound).await?;

        let mut display = if translating {
            match self
                .translator
                .translate(&raw_reply, working_language, user_language)
                .await
            {
                Ok(translated) => translated,
                Err(e) => {
                    warn!("Showing untranslated reply: {}", e);
                    self.translator.metrics().record_outbound_fallback();
                    format!(
                        "{}{}",
                        raw_reply,
                        strings::reply_not_translated_notice(user_language)
                    )
                }
            }
        } else {
            raw_reply.clone()
        };

        if input_not_understood {
            display = format!(
                "{}{}",
                strings::input_not_understood_notice(user_language),
                display
            );
        }

        Ok(ChatMessage::bot(
            display,
            language,
            translating.then_some(raw_reply),
        ))
    }

    // ==================== Accessors ====================

    pub async fn phase(&self) -> SessionPhase {
        self.state.lock().await.phase
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.state.lock().await.transcript.clone()
    }

    pub async fn selected_language(&self) -> Language {
        self.state.lock().await.language
    }

    /// Session-level banner text, if the last init or turn failed.
    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn is_loading(&self) -> bool {
        matches!(
            self.state.lock().await.phase,
            SessionPhase::Initializing | SessionPhase::Sending
        )
    }

    pub async fn pending_input(&self) -> String {
        self.state.lock().await.pending_input.clone()
    }

    pub async fn set_pending_input(&self, text: impl Into<String>) {
        self.state.lock().await.pending_input = text.into();
    }

    pub async fn conversation_id(&self) -> Option<Uuid> {
        self.session.conversation_id().await
    }

    pub fn translation_metrics(&self) -> MetricsReport {
        self.translator.metrics().report()
    }
}
