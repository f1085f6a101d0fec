//! GeminiApiAgent - Direct REST API implementation for Gemini.
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

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Generator that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiApiAgent {
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

    /// Resolves the API key from `secrets`, then `GEMINI_API_KEY`.
    ///
    /// Model name defaults to `gemini-2.5-flash` if not specified.
    pub fn from_secrets(secrets: &SecretConfig) -> Result<Self, GenerationError> {
        if let Some(gemini) = &secrets.gemini {
            let model = gemini
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
            return Ok(Self::new(gemini.api_key.clone(), model));
        }

        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            GenerationError::Configuration(
                "GEMINI_API_KEY not found in secret.json or environment variables".into(),
            )
        })?;
        let model = env::var("GEMINI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into());
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

    /// Points the agent at a different API root (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send_request(&self, body: &GenerateContentRequest<'_>) -> Result<String, GenerationError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| map_send_error("Gemini", err, self.timeout))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, error_message(body_text), retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::Parse(format!("Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiApiAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig { max_output_tokens },
        };

        self.send_request(&request).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn error_message(body: String) -> String {
    match serde_json::from_str::<ErrorWrapper>(&body) {
        Ok(wrapper) => {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        }
        Err(_) => body,
    }
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}
