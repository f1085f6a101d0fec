//! Text generation capability.
//!
//! The pipeline talks to the model through [`TextGenerator`]. Implementations
//! live in `adcraft-interaction`; they make a single attempt and either return
//! the complete text or a [`GenerationError`].

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Output bound applied to every generation unless configured otherwise.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1500;

/// Why a generation attempt failed. No partial output is ever carried.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The request never produced an HTTP response.
    #[error("Generation request failed: {0}")]
    Network(String),

    /// The request did not finish within the adapter's timeout.
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),

    /// The capability answered with a non-success status.
    #[error("Generation service returned {status}: {message}")]
    Http {
        status: u16,
        message: String,
        /// Whether a caller could reasonably retry. Informational only.
        retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The response could not be decoded.
    #[error("Failed to parse generation response: {0}")]
    Parse(String),

    /// The response contained no text.
    #[error("Generation service returned no text")]
    EmptyResponse,

    /// The adapter is missing credentials or settings.
    #[error("Generation is not configured: {0}")]
    Configuration(String),
}

impl GenerationError {
    /// Whether the failure is transient (rate limit, 5xx, connect, timeout).
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Http { retryable, .. } => *retryable,
            Self::Parse(_) | Self::EmptyResponse | Self::Configuration(_) => false,
        }
    }
}

/// An external text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Identifier of the model requests are sent to.
    fn model(&self) -> &str;

    /// Generates text for `prompt`, producing at most `max_output_tokens`.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The complete generated text
    /// - `Err(GenerationError)`: The single attempt failed
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, GenerationError>;
}
