//! Model gateway contract and the conversation session built on it.
//!
//! The hosted model is stateless between requests, so a "conversation" is
//! the system instruction plus the turns exchanged so far, replayed on every
//! call. `ChatSession` owns the single live conversation and its lifecycle.

use crate::error::{ChatError, GatewayError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Context replayed to the model on each turn.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: Uuid,
    pub system_instruction: String,
    pub history: Vec<Turn>,
}

impl Conversation {
    pub fn new(system_instruction: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            system_instruction: system_instruction.to_string(),
            history: Vec::new(),
        }
    }
}

/// Remote generative model.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Open a new conversation. Remote backends without server-side sessions
    /// just build the local context.
    async fn start_conversation(
        &self,
        system_instruction: &str,
    ) -> Result<Conversation, GatewayError> {
        Ok(Conversation::new(system_instruction))
    }

    /// Send `text` as the next user turn of `conversation` and return the
    /// model's reply. Recording the exchange is the caller's job.
    async fn send_turn(&self, conversation: &Conversation, text: &str)
        -> Result<String, GatewayError>;

    /// Single prompt with no conversation context.
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GatewayError>;
}

/// The one live conversation of a login session.
pub struct ChatSession {
    gateway: Arc<dyn ModelGateway>,
    system_instruction: String,
    conversation: Mutex<Option<Conversation>>,
}

impl ChatSession {
    pub fn new(gateway: Arc<dyn ModelGateway>, system_instruction: impl Into<String>) -> Self {
        Self {
            gateway,
            system_instruction: system_instruction.into(),
            conversation: Mutex::new(None),
        }
    }

    /// Create the conversation unless one is already live; returns its id.
    pub async fn create_conversation(&self) -> Result<Uuid, GatewayError> {
        let mut slot = self.conversation.lock().await;
        if let Some(existing) = slot.as_ref() {
            return Ok(existing.id);
        }

        let conversation = self
            .gateway
            .start_conversation(&self.system_instruction)
            .await?;
        info!("Started conversation {}", conversation.id);
        let id = conversation.id;
        *slot = Some(conversation);
        Ok(id)
    }

    /// Run one turn, re-creating the conversation first if it was cleared.
    ///
    /// The lock is not held while the model is thinking, so `clear` never
    /// waits on the network. A reply that comes back for a conversation that
    /// has since been cleared is returned but not recorded.
    pub async fn send_turn(&self, text: &str) -> Result<String, ChatError> {
        self.create_conversation().await?;

        let existing = self.conversation.lock().await.clone();
        let snapshot = match existing {
            Some(conversation) => conversation,
            // Cleared between creation and here; start over once.
            None => {
                let conversation = self
                    .gateway
                    .start_conversation(&self.system_instruction)
                    .await?;
                *self.conversation.lock().await = Some(conversation.clone());
                conversation
            }
        };

        let reply = self.gateway.send_turn(&snapshot, text).await?;

        let mut slot = self.conversation.lock().await;
        match slot.as_mut() {
            Some(live) if live.id == snapshot.id => {
                live.history.push(Turn {
                    role: Role::User,
                    text: text.to_string(),
                });
                live.history.push(Turn {
                    role: Role::Model,
                    text: reply.clone(),
                });
            }
            _ => debug!(
                "Conversation {} cleared while a turn was in flight; not recording reply",
                snapshot.id
            ),
        }

        Ok(reply)
    }

    /// Drop the live conversation. History is not kept anywhere.
    pub async fn clear(&self) {
        if let Some(old) = self.conversation.lock().await.take() {
            info!(
                "Cleared conversation {} ({} turns)",
                old.id,
                old.history.len()
            );
        }
    }

    pub async fn conversation_id(&self) -> Option<Uuid> {
        self.conversation.lock().await.as_ref().map(|c| c.id)
    }

    pub async fn history(&self) -> Vec<Turn> {
        self.conversation
            .lock()
            .await
            .as_ref()
            .map(|c| c.history.clone())
            .unwrap_or_default()
    }
}
