//! OpenAIApiAgent - Direct REST API implementation for OpenAI GPT.
//!
//! Calls the Chat Completions API. Configuration priority: `secret.json` >
//! environment variables

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

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const BASE_URL: &str = "https://api.openai.com/v1";

/// Generator that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAIApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAIApiAgent {
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

    /// Resolves the API key from `secrets`, then `OPENAI_API_KEY`.
    ///
    /// Model name defaults to `gpt-4o` if not specified.
    pub fn from_secrets(secrets: &SecretConfig) -> Result<Self, GenerationError> {
        if let Some(openai) = &secrets.openai {
            let model = openai
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
            return Ok(Self::new(openai.api_key.clone(), model));
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            GenerationError::Configuration(
                "OPENAI_API_KEY not found in secret.json or environment variables".into(),
            )
        })?;
        let model = env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.into());
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

    /// Points the agent at a different API root (Azure-style proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send_request(&self, body: &ChatCompletionRequest<'_>) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| map_send_error("OpenAI", err, self.timeout))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            let message = serde_json::from_str::<ErrorResponse>(&body_text)
                .map(|wrapper| wrapper.error.message)
                .unwrap_or(body_text);
            return Err(map_http_error(status, message, retry_after));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::Parse(format!("OpenAI response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl TextGenerator for OpenAIApiAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_completion_tokens: max_output_tokens,
        };

        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_completion_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, GenerationError> {
    response
        .choices
        .into_iter()
        .find_map(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}
