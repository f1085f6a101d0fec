//! Configuration models.
//!
//! `RootConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Both are loaded by services in `adcraft-infrastructure`.

use crate::creative::DEFAULT_QUERY_LIMIT;
use crate::generation::DEFAULT_MAX_OUTPUT_TOKENS;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Generation provider backing the `TextGenerator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    Claude,
    OpenAI,
    #[default]
    Gemini,
}

/// Which creative repository implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreKind {
    /// One TOML file per owner under the data directory.
    #[default]
    File,
    /// A PostgREST-style HTTP collection.
    Rest,
    /// Process memory only.
    Memory,
}

/// `[generation]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub provider: Provider,
    /// Model override; the provider default is used when absent.
    pub model_name: Option<String>,
    pub max_output_tokens: u32,
    /// Adapter-level request timeout.
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model_name: None,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_secs: 60,
        }
    }
}

/// `[library]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Maximum records fetched per load.
    pub query_limit: usize,
    pub store: StoreKind,
    /// Base URL of the REST backend, e.g. `https://xyz.example.co/rest/v1`.
    pub rest_base_url: Option<String>,
    /// Collection name on the REST backend.
    pub rest_table: String,
    /// Per-request timeout for the REST backend.
    pub rest_timeout_secs: u64,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            query_limit: DEFAULT_QUERY_LIMIT,
            store: StoreKind::default(),
            rest_base_url: None,
            rest_table: "creatives".to_string(),
            rest_timeout_secs: 30,
        }
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub generation: GenerationSettings,
    pub library: LibrarySettings,
}

/// API key entry for a generation provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSecret {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// API key for the REST repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestSecret {
    pub api_key: String,
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub claude: Option<ProviderSecret>,
    #[serde(default)]
    pub openai: Option<ProviderSecret>,
    #[serde(default)]
    pub gemini: Option<ProviderSecret>,
    #[serde(default)]
    pub rest: Option<RestSecret>,
}

impl SecretConfig {
    /// The secret entry for `provider`, if configured.
    pub fn provider(&self, provider: Provider) -> Option<&ProviderSecret> {
        match provider {
            Provider::Claude => self.claude.as_ref(),
            Provider::OpenAI => self.openai.as_ref(),
            Provider::Gemini => self.gemini.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RootConfig = toml::from_str(
            r#"
            [generation]
            provider = "claude"

            [library]
            query_limit = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.generation.provider, Provider::Claude);
        assert_eq!(config.generation.max_output_tokens, 1500);
        assert_eq!(config.library.query_limit, 20);
        assert_eq!(config.library.store, StoreKind::File);
        assert_eq!(config.library.rest_table, "creatives");
        assert_eq!(config.library.rest_timeout_secs, 30);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.library.query_limit, 50);
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(Provider::from_str("openai").unwrap(), Provider::OpenAI);
        assert_eq!(Provider::OpenAI.to_string(), "openai");
        let parsed: GenerationSettings = toml::from_str(r#"provider = "openai""#).unwrap();
        assert_eq!(parsed.provider, Provider::OpenAI);
    }

    #[test]
    fn test_secret_lookup() {
        let secrets: SecretConfig =
            serde_json::from_str(r#"{"gemini": {"api_key": "g-key"}}"#).unwrap();
        assert_eq!(secrets.provider(Provider::Gemini).unwrap().api_key, "g-key");
        assert!(secrets.provider(Provider::Claude).is_none());
    }
}
