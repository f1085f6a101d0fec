//! Composition root: wires configuration, secrets, storage, generator and
//! session gate into a `LibraryController`.

use adcraft_application::{LibraryController, LibraryNotice, NoticeCallback};
use adcraft_core::config::{RootConfig, StoreKind};
use adcraft_core::creative::CreativeRepository;
use adcraft_core::generation::{GenerationError, TextGenerator};
use adcraft_core::secret::SecretService;
use adcraft_infrastructure::{
    AdcraftPaths, ConfigService, FileCreativeRepository, InMemoryCreativeRepository,
    LocalSessionGate, RestCreativeRepository, SecretServiceImpl,
};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub struct AppContext {
    pub config: RootConfig,
    pub gate: LocalSessionGate,
    pub controller: LibraryController,
}

/// Stands in when no provider could be configured, so read-only commands
/// still work and `generate` reports why it cannot run.
struct UnavailableGenerator {
    reason: String,
}

#[async_trait]
impl TextGenerator for UnavailableGenerator {
    fn model(&self) -> &str {
        "unavailable"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Configuration(self.reason.clone()))
    }
}

pub async fn build(paths: AdcraftPaths, store_override: Option<StoreKind>) -> Result<AppContext> {
    let config_service = ConfigService::new(&paths);
    let mut config = config_service
        .load()
        .context("Failed to load config.toml")?;
    if let Some(store) = store_override {
        config.library.store = store;
    }

    let secret_service = SecretServiceImpl::new(&paths);
    if !secret_service.secret_file_exists().await {
        tracing::debug!("[Bootstrap] secret.json missing; `adcraft init` creates a template");
    }
    let secrets = secret_service
        .load_secrets()
        .await
        .context("Failed to load secret.json")?;

    let repository: Arc<dyn CreativeRepository> = match config.library.store {
        StoreKind::File => Arc::new(FileCreativeRepository::new(paths.creatives_dir())),
        StoreKind::Memory => Arc::new(InMemoryCreativeRepository::new()),
        StoreKind::Rest => {
            let base_url = config
                .library
                .rest_base_url
                .clone()
                .ok_or_else(|| anyhow!("[library] rest_base_url is required for the rest store"))?;
            Arc::new(
                RestCreativeRepository::from_secrets(
                    base_url,
                    config.library.rest_table.clone(),
                    &secrets,
                )?
                .with_timeout(Duration::from_secs(config.library.rest_timeout_secs)),
            )
        }
    };
    tracing::info!("[Bootstrap] Creative store: {}", config.library.store);

    let generator: Arc<dyn TextGenerator> =
        match adcraft_interaction::build_generator(&config.generation, &secrets) {
            Ok(generator) => generator,
            Err(err) => {
                tracing::debug!("[Bootstrap] Generator unavailable: {}", err);
                Arc::new(UnavailableGenerator {
                    reason: err.to_string(),
                })
            }
        };

    let gate = LocalSessionGate::with_persistence(paths.session_file())
        .context("Failed to read session.toml")?;

    // Other failures come back as errors from the command itself.
    let print_notice: NoticeCallback = Arc::new(|notice: LibraryNotice| {
        if matches!(notice, LibraryNotice::PersistenceFailed { .. }) {
            eprintln!("{notice}");
        }
    });

    let controller = LibraryController::new(repository, generator)
        .with_max_output_tokens(config.generation.max_output_tokens)
        .with_query_limit(config.library.query_limit)
        .with_notice_callback(print_notice);

    Ok(AppContext {
        config,
        gate,
        controller,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcraft_core::creative::{CreativeForm, CreativeKind};
    use adcraft_core::session::{SessionGate, UserIdentity};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_with_memory_store() {
        let temp_dir = TempDir::new().unwrap();
        let app = build(AdcraftPaths::with_base(temp_dir.path()), Some(StoreKind::Memory))
            .await
            .unwrap();

        assert_eq!(app.config.library.store, StoreKind::Memory);
        assert!(app.gate.current().is_none());
        assert!(app.controller.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_rest_store_requires_base_url() {
        let temp_dir = TempDir::new().unwrap();
        let result = build(AdcraftPaths::with_base(temp_dir.path()), Some(StoreKind::Rest)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unavailable_generator_reports_configuration() {
        let generator = UnavailableGenerator {
            reason: "GEMINI_API_KEY not found".into(),
        };
        let controller =
            LibraryController::new(Arc::new(InMemoryCreativeRepository::new()), Arc::new(generator));
        let form = CreativeForm {
            industry: "Tea".into(),
            product: "Matcha".into(),
            target_audience: "Students".into(),
            ..Default::default()
        };

        let err = controller
            .generate(Some(&UserIdentity::new("u")), CreativeKind::Copy, &form)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
