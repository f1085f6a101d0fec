//! ClaudeApiAgent - Direct REST API implementation for Claude.
//!
//! Configuration priority: `secret.json` > environment variables

use crate::http::{
    DEFAULT_TIMEOUT, client_with_timeout, map_http_error, map_send_error, parse_retry_after,
};
use adcraft_core::config::SecretConfig;
use adcraft_core::generation::{GenerationError, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const BASE_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Generator that talks to the Claude Messages API.
#[derive(Clone)]
pub struct ClaudeApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl ClaudeApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: client_with_timeout(DEFAULT_TIMEOUT),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolves the API key from `secrets`, then `ANTHROPIC_API_KEY`.
    ///
    /// The model comes from the secret entry, then `CLAUDE_MODEL_NAME`, then
    /// [`DEFAULT_CLAUDE_MODEL`].
    pub fn from_secrets(secrets: &SecretConfig) -> Result<Self, GenerationError> {
        if let Some(claude) = &secrets.claude {
            let model = claude
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_CLAUDE_MODEL.to_string());
            return Ok(Self::new(claude.api_key.clone(), model));
        }

        let api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| {
            GenerationError::Configuration(
                "ANTHROPIC_API_KEY not found in secret.json or environment variables".into(),
            )
        })?;
        let model = env::var("CLAUDE_MODEL_NAME").unwrap_or_else(|_| DEFAULT_CLAUDE_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = client_with_timeout(timeout);
        self.timeout = timeout;
        self
    }

    /// Points the agent at a different API root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send_request(&self, body: &CreateMessageRequest<'_>) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| map_send_error("Claude", err, self.timeout))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Claude error body".to_string());
            let message = serde_json::from_str::<ErrorResponse>(&body_text)
                .map(|wrapper| wrapper.error.message)
                .unwrap_or(body_text);
            return Err(map_http_error(status, message, retry_after));
        }

        let parsed: CreateMessageResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::Parse(format!("Claude response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl TextGenerator for ClaudeApiAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        let request = CreateMessageRequest {
            model: &self.model,
            max_tokens: max_output_tokens,
            messages: vec![Message {
                role: "user",
                content: vec![ContentBlock::Text { text: prompt }],
            }],
        };

        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct CreateMessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock<'a> {
    Text { text: &'a str },
}

#[derive(Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlockResponse>,
}

#[derive(Deserialize)]
struct ContentBlockResponse {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: CreateMessageResponse) -> Result<String, GenerationError> {
    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();

    if text.trim().is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}
