//! Provider adapters for the text-generation capability.
//!
//! Each agent implements [`TextGenerator`] against one vendor's HTTP API.
//! [`build_generator`] picks the agent named in `config.toml`.

pub mod claude_api_agent;
pub mod gemini_api_agent;
mod http;
pub mod openai_api_agent;

pub use claude_api_agent::ClaudeApiAgent;
pub use gemini_api_agent::GeminiApiAgent;
pub use http::DEFAULT_TIMEOUT;
pub use openai_api_agent::OpenAIApiAgent;

use adcraft_core::config::{GenerationSettings, Provider, SecretConfig};
use adcraft_core::generation::{GenerationError, TextGenerator};
use std::sync::Arc;
use std::time::Duration;

/// Builds the generator selected by `settings`.
///
/// `settings.model_name` wins over the model stored alongside the API key.
pub fn build_generator(
    settings: &GenerationSettings,
    secrets: &SecretConfig,
) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    let timeout = Duration::from_secs(settings.timeout_secs);

    let generator: Arc<dyn TextGenerator> = match settings.provider {
        Provider::Claude => {
            let mut agent = ClaudeApiAgent::from_secrets(secrets)?.with_timeout(timeout);
            if let Some(model) = &settings.model_name {
                agent = agent.with_model(model.clone());
            }
            Arc::new(agent)
        }
        Provider::OpenAI => {
            let mut agent = OpenAIApiAgent::from_secrets(secrets)?.with_timeout(timeout);
            if let Some(model) = &settings.model_name {
                agent = agent.with_model(model.clone());
            }
            Arc::new(agent)
        }
        Provider::Gemini => {
            let mut agent = GeminiApiAgent::from_secrets(secrets)?.with_timeout(timeout);
            if let Some(model) = &settings.model_name {
                agent = agent.with_model(model.clone());
            }
            Arc::new(agent)
        }
    };

    tracing::info!(
        target: "generation",
        provider = %settings.provider,
        model = generator.model(),
        "Text generator ready"
    );
    Ok(generator)
}
