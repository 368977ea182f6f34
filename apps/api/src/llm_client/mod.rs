//! LLM Client: the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! Task code depends on the `CompletionClient` trait; `LlmClient` is the
//! HTTP implementation used in production.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed (status {status:?}): {message}")]
    Auth {
        status: Option<u16>,
        message: String,
    },

    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Raw model output. Opaque until a task parses it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub text: String,
}

/// A chat-style completion backend: one system message, one user message.
///
/// Implementations make at most the attempts their own config allows and
/// never panic; every failure is an `LlmError`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<CompletionResult, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    fn into_text(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for an OpenAI-compatible chat-completion endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Single HTTP round trip. Returns the decoded text or a classified error.
    async fn send_once(&self, body: &ChatRequest<'_>, api_key: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth {
                    status: Some(status.as_u16()),
                    message,
                },
                _ => LlmError::Upstream {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let raw = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        parsed.into_text().ok_or(LlmError::EmptyContent)
    }
}

/// Only transport failures, rate limiting and server errors are worth another attempt.
fn is_retryable(error: &LlmError) -> bool {
    match error {
        LlmError::Network(_) => true,
        LlmError::Upstream { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

/// Exponential backoff: 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (1u64 << attempt.saturating_sub(1).min(6)))
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<CompletionResult, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Auth {
                status: None,
                message: "no API key configured (set LLM_API_KEY)".to_string(),
            })?;

        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
        };

        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "Completion attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.send_once(&request_body, api_key).await {
                Ok(text) => {
                    debug!(
                        "Completion succeeded: model={}, chars={}",
                        self.config.model,
                        text.len()
                    );
                    return Ok(CompletionResult { text });
                }
                Err(e) if is_retryable(&e) && attempt < self.config.max_retries => {
                    warn!("Completion call failed: {e}");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
