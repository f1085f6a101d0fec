//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and caches it.

use crate::paths::AdcraftPaths;
use crate::storage::AtomicTomlFile;
use adcraft_core::Result;
use adcraft_core::config::RootConfig;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicTomlFile<RootConfig>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &AdcraftPaths) -> Self {
        Self::with_path(paths.config_file())
    }

    /// Creates a service reading a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads `config.toml`; a missing or empty file yields defaults.
    pub fn load(&self) -> Result<RootConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            path = %self.file.path().display(),
            provider = %loaded.generation.provider,
            store = %loaded.library.store,
            "Loaded configuration"
        );

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` and refreshes the cache.
    pub fn save(&self, config: &RootConfig) -> Result<()> {
        self.file.save(config)?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
