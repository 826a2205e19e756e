use crate::config::Config;
use crate::error::{ConfigurationError, GatewayError};
use crate::gateway::{Conversation, ModelGateway, Role};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Gemini `generateContent` request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<Role>, text: &str) -> Self {
        Self {
            role,
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl GeminiClient {
    /// Fails fast when no credential was resolved at startup.
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let api_key = config.api_key()?;
        Ok(Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: config.gemini_model.clone(),
            api_url: config.gemini_api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    async fn post(&self, request: &GenerateRequest) -> Result<String, GatewayError> {
        debug!(
            "Calling {} with {} content entries",
            self.model,
            request.contents.len()
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            warn!("Gemini API error ({}): {}", status, body);
            return Err(GatewayError::Api { status, body });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.text().ok_or(GatewayError::EmptyResponse)
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn send_turn(
        &self,
        conversation: &Conversation,
        text: &str,
    ) -> Result<String, GatewayError> {
        let mut contents: Vec<Content> = conversation
            .history
            .iter()
            .map(|turn| Content::text(Some(turn.role), &turn.text))
            .collect();
        contents.push(Content::text(Some(Role::User), text));

        let request = GenerateRequest {
            system_instruction: Some(Content::text(None, &conversation.system_instruction)),
            contents,
            generation_config: None,
        };

        self.post(&request).await
    }

    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GatewayError> {
        let request = GenerateRequest {
            system_instruction: None,
            contents: vec![Content::text(Some(Role::User), prompt)],
            generation_config: Some(GenerationConfig { temperature }),
        };

        self.post(&request).await
    }
}
