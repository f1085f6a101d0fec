//! Secret service implementation.
//!
//! Reads API keys from `secret.json`. The file is optional: adapters fall
//! back to environment variables when an entry is missing.

use crate::paths::AdcraftPaths;
use adcraft_core::Result;
use adcraft_core::config::SecretConfig;
use adcraft_core::secret::SecretService;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Service for loading secret configuration.
///
/// # Example
///
/// ```ignore
/// use adcraft_infrastructure::{AdcraftPaths, SecretServiceImpl};
/// use adcraft_core::secret::SecretService;
///
/// let service = SecretServiceImpl::new(&AdcraftPaths::resolve()?);
/// let secrets = service.load_secrets().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    pub fn new(paths: &AdcraftPaths) -> Self {
        Self::with_path(paths.secret_file())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    fn load_internal(&self) -> Result<SecretConfig> {
        {
            let cached = self.secrets.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(secrets) = cached.as_ref() {
                return Ok(secrets.clone());
            }
        }

        let loaded = if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            if content.trim().is_empty() {
                SecretConfig::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            tracing::debug!("No secret.json found; relying on environment variables");
            SecretConfig::default()
        };

        *self.secrets.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.path.exists()
    }
}
