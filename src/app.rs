//! Headless application model: pages, login, preferences and the chat
//! session, independent of how they are rendered.

use crate::content::SUGGESTED_PROMPTS;
use crate::error::{ConfigurationError, LoginError};
use crate::gateway::ModelGateway;
use crate::i18n::Language;
use crate::orchestrator::{ChatOrchestrator, OrchestratorConfig, SessionPhase, TurnOutcome};
use crate::preferences::{PreferenceStore, Preferences, Theme};
use crate::voice::{ToggleOutcome, TranscriptSegment, VoiceCapture};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Chat,
    Settings,
}

/// Builds the model gateway the first time chat is entered.
pub type GatewayConnector =
    Box<dyn Fn() -> Result<Arc<dyn ModelGateway>, ConfigurationError> + Send + Sync>;

/// What the chat page should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatStatus {
    LoginRequired,
    ConfigurationError(String),
    Initializing,
    InitializationFailed(String),
    Ready,
}

pub struct App {
    page: Page,
    redirect_after_login: Option<Page>,
    preferences: Preferences,
    store: PreferenceStore,
    connector: GatewayConnector,
    orchestrator_config: OrchestratorConfig,
    orchestrator: Option<ChatOrchestrator>,
    config_error: Option<ConfigurationError>,
    voice: VoiceCapture,
}

impl App {
    pub fn new(
        store: PreferenceStore,
        connector: GatewayConnector,
        orchestrator_config: OrchestratorConfig,
        voice_supported: bool,
    ) -> Self {
        let preferences = store.load();
        info!(
            "Loaded preferences: theme={:?}, language={}, user={}",
            preferences.theme,
            preferences.selected_language,
            preferences.current_user.as_deref().unwrap_or("<none>")
        );

        Self {
            page: Page::Home,
            redirect_after_login: None,
            preferences,
            store,
            connector,
            orchestrator_config,
            orchestrator: None,
            config_error: None,
            voice: VoiceCapture::new(voice_supported),
        }
    }

    // ==================== Accessors ====================

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn current_user(&self) -> Option<&str> {
        self.preferences.current_user.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.preferences.current_user.is_some()
    }

    pub fn theme(&self) -> Theme {
        self.preferences.theme
    }

    pub fn language(&self) -> Language {
        self.preferences.language()
    }

    pub fn orchestrator(&self) -> Option<&ChatOrchestrator> {
        self.orchestrator.as_ref()
    }

    pub fn voice(&self) -> &VoiceCapture {
        &self.voice
    }

    pub async fn chat_status(&self) -> ChatStatus {
        if !self.is_logged_in() {
            return ChatStatus::LoginRequired;
        }
        if let Some(e) = &self.config_error {
            return ChatStatus::ConfigurationError(e.to_string());
        }
        let Some(orchestrator) = &self.orchestrator else {
            return ChatStatus::Initializing;
        };
        match orchestrator.phase().await {
            SessionPhase::Uninitialized | SessionPhase::Initializing => ChatStatus::Initializing,
            SessionPhase::Errored => ChatStatus::InitializationFailed(
                orchestrator.error().await.unwrap_or_default(),
            ),
            SessionPhase::Ready | SessionPhase::Sending => ChatStatus::Ready,
        }
    }

    // ==================== Navigation ====================

    /// Go to `page`, applying the login redirect rules.
    pub async fn navigate(&mut self, page: Page) -> Page {
        self.page = match page {
            Page::Chat if !self.is_logged_in() => {
                debug!("Chat requires login; redirecting");
                self.redirect_after_login = Some(Page::Chat);
                Page::Login
            }
            Page::Login if self.is_logged_in() => {
                self.redirect_after_login.take().unwrap_or(Page::Home)
            }
            other => other,
        };

        if self.page == Page::Chat {
            self.enter_chat().await;
        }
        self.page
    }

    /// Demo login: any non-blank pair is accepted.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Page, LoginError> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(LoginError::MissingCredentials);
        }

        info!("User {} logged in", username);
        self.preferences.current_user = Some(username.to_string());
        self.persist();

        self.page = self.redirect_after_login.take().unwrap_or(Page::Chat);
        if self.page == Page::Chat {
            self.enter_chat().await;
        }
        Ok(self.page)
    }

    pub async fn logout(&mut self) {
        if let Some(user) = self.preferences.current_user.take() {
            info!("User {} logged out", user);
        }
        self.persist();

        self.voice.stop();
        if let Some(orchestrator) = &self.orchestrator {
            orchestrator.reset().await;
        }
        self.redirect_after_login = None;
        self.page = Page::Home;
    }

    // ==================== Chat ====================

    /// Connect on first use, then make sure the session is initialized.
    pub async fn enter_chat(&mut self) {
        if !self.is_logged_in() {
            return;
        }

        if self.orchestrator.is_none() {
            match (self.connector)() {
                Ok(gateway) => {
                    self.config_error = None;
                    self.orchestrator = Some(ChatOrchestrator::new(
                        gateway,
                        self.orchestrator_config.clone(),
                        self.preferences.language(),
                    ));
                }
                Err(e) => {
                    warn!("Chat unavailable: {}", e);
                    self.config_error = Some(e);
                    return;
                }
            }
        }

        if let Some(orchestrator) = &self.orchestrator {
            if let Err(e) = orchestrator.initialize().await {
                debug!("Initialization left the session errored: {}", e);
            }
        }
    }

    /// Retry after a configuration or initialization failure.
    pub async fn retry_initialization(&mut self) {
        info!("Retrying chat initialization");
        self.enter_chat().await;
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        if let Some(orchestrator) = &self.orchestrator {
            orchestrator.set_pending_input(text).await;
        }
    }

    pub async fn send_input(&mut self) -> TurnOutcome {
        self.voice.stop();
        match &self.orchestrator {
            Some(orchestrator) => orchestrator.send_pending().await,
            None => TurnOutcome::Ignored,
        }
    }

    /// Send one of the suggested prompts by position.
    pub async fn send_suggested(&mut self, index: usize) -> TurnOutcome {
        let Some(prompt) = SUGGESTED_PROMPTS.get(index) else {
            return TurnOutcome::Ignored;
        };
        self.voice.stop();
        match &self.orchestrator {
            Some(orchestrator) => orchestrator.send_message(prompt).await,
            None => TurnOutcome::Ignored,
        }
    }

    // ==================== Preferences ====================

    pub fn toggle_theme(&mut self) -> Theme {
        self.preferences.theme = self.preferences.theme.toggled();
        self.persist();
        self.preferences.theme
    }

    pub async fn change_language(&mut self, code: &str) -> anyhow::Result<Language> {
        let language = Language::from_code(code)?;
        self.preferences.selected_language = language.code().to_string();
        self.persist();

        if let Some(orchestrator) = &self.orchestrator {
            orchestrator.change_language(language.code()).await?;
        }
        Ok(language)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.preferences) {
            warn!("Failed to save preferences: {:#}", e);
        }
    }

    // ==================== Voice ====================

    pub fn toggle_voice(&mut self) -> ToggleOutcome {
        self.voice.toggle()
    }

    /// Write recognized speech into the input slot.
    pub async fn apply_voice_result(&self, segments: &[TranscriptSegment]) {
        let text = self.voice.on_result(segments);
        self.set_input(text).await;
    }

    pub fn apply_voice_error(&mut self, code: &str) {
        let language = self.preferences.language();
        self.voice.on_error(code, language);
    }

    pub fn voice_ended(&mut self) {
        self.voice.on_end();
    }
}
