//! OpenAI-compatible Completion Client
//!
//! Sends the assembled repository context to a chat-completions endpoint and
//! returns the raw completion text. One round trip per call with no retry;
//! failures surface to the caller.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::prompt::SYSTEM_INSTRUCTION;
use crate::config::CompletionConfig;
use crate::constants::completion::CHAT_COMPLETIONS_PATH;
use crate::types::{CompletionError, Result, WikiError};

/// Outcome of one completion call
pub type CompletionResult = std::result::Result<String, CompletionError>;

/// Generates structured documentation text from a context payload
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the raw completion text, expected (not guaranteed) to embed
    /// the JSON object mandated by the system instruction
    async fn generate_structured_docs(&self, context: &str) -> CompletionResult;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}

/// Shared completion client for use across concurrent runs
pub type SharedCompletionClient = Arc<dyn CompletionClient>;

// =============================================================================
// Request / Response
// =============================================================================

/// One outgoing chat-completion request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the first choice's content out of a response body
fn extract_content(body: &str) -> CompletionResult {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::MalformedBody(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|content| !content.is_empty())
        .ok_or(CompletionError::EmptyContent)
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Completion client over an OpenAI-compatible HTTP endpoint
pub struct HttpCompletionClient {
    /// Stored securely - never exposed in logs or debug output
    api_key: Option<SecretString>,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl HttpCompletionClient {
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WikiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.api_key.clone().map(SecretString::from),
            endpoint: format!(
                "{}{}",
                config.api_base.trim_end_matches('/'),
                CHAT_COMPLETIONS_PATH
            ),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_request(&self, context: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(context),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn generate_structured_docs(&self, context: &str) -> CompletionResult {
        info!(
            "Requesting documentation (model: {}, temperature: {})",
            self.model, self.temperature
        );

        let start_time = Instant::now();
        let request = self.build_request(context);

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        debug!(
            "Completion endpoint answered {} in {}ms",
            status,
            start_time.elapsed().as_millis()
        );

        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_content(&body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpCompletionClient {
        let config = CompletionConfig {
            api_base: "http://localhost:8317/".to_string(),
            model: "test-model".to_string(),
            api_key: Some("sk-test".to_string()),
            ..CompletionConfig::default()
        };
        HttpCompletionClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_path() {
        assert_eq!(
            client().endpoint(),
            "http://localhost:8317/v1/chat/completions"
        );
    }

    #[test]
    fn test_build_request_shape() {
        let request = client().build_request("REPOSITORY: a/b");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "test-model");
        assert_eq!(value["max_tokens"], 8192);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], SYSTEM_INSTRUCTION);
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "REPOSITORY: a/b");
        assert!((request.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-test"));
    }

    #[test]
    fn test_extract_content() {
        let body = r##"{"choices": [{"message": {"content": "# Test Doc\nThis is a test."}}]}"##;
        assert_eq!(extract_content(body).unwrap(), "# Test Doc\nThis is a test.");
    }

    #[test]
    fn test_extract_content_empty_cases() {
        for body in [
            r#"{"choices": []}"#,
            r#"{"choices": [{"message": {"content": ""}}]}"#,
            r#"{"choices": [{"message": {"content": null}}]}"#,
            r#"{"choices": [{}]}"#,
            r#"{"id": "x"}"#,
        ] {
            assert!(
                matches!(extract_content(body), Err(CompletionError::EmptyContent)),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_extract_content_malformed() {
        assert!(matches!(
            extract_content("<html>gateway</html>"),
            Err(CompletionError::MalformedBody(_))
        ));
    }
}
