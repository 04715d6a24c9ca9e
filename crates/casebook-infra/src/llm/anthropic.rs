//! AnthropicCompletion -- concrete [`CompletionProvider`] implementation
//! for the Anthropic Messages API.
//!
//! Sends non-streaming requests to `/v1/messages` with proper
//! authentication headers. The API key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use casebook_core::llm::provider::CompletionProvider;
use casebook_types::llm::LlmError;

/// Anthropic Messages API client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing HTTP request headers. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct AnthropicCompletion {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicCompletion {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "claude-sonnet-4-20250514")
    /// * `max_tokens` - Output token cap per request
    pub fn new(api_key: SecretString, model: String, max_tokens: u32) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min timeout for long generations
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.anthropic.com".to_string(),
            model,
            max_tokens,
        }
    }

    /// The configured model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// AnthropicCompletion intentionally does NOT derive Debug to prevent
// accidental exposure of internal state. The SecretString field ensures
// the API key is never printed, but we also omit Debug entirely.

impl CompletionProvider for AnthropicCompletion {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str, system_prompt: &str) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![WireMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            system: (!system_prompt.is_empty()).then(|| system_prompt.to_string()),
        };
        let url = self.url("/v1/messages");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 => LlmError::InvalidRequest(error_body),
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                529 => LlmError::Overloaded(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let text: String = parsed
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect();

        if text.is_empty() {
            return Err(LlmError::Deserialization(
                "response contained no text content".to_string(),
            ));
        }

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Wire types for the Messages API
// ---------------------------------------------------------------------------

/// Request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

/// A single message in an Anthropic conversation.
#[derive(Debug, Clone, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// Response body for a non-streaming Messages call.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// A content block in an Anthropic response. Only text blocks are
/// consumed; anything else is tolerated and skipped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}
