//! Unified path management for AdCraft configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/adcraft/           # Config directory
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! ├── session.toml             # Signed-in user
//! └── logs/                    # Daily rolling CLI logs
//!
//! ~/.local/share/adcraft/      # Data directory
//! └── creatives/               # One TOML file per owner
//! ```
//!
//! Setting `ADCRAFT_HOME` moves everything under that directory, with the
//! data directory at `$ADCRAFT_HOME/data`.

use adcraft_core::config::{ProviderSecret, SecretConfig};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that relocates all AdCraft files.
pub const HOME_ENV: &str = "ADCRAFT_HOME";

const APP_DIR: &str = "adcraft";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Neither `ADCRAFT_HOME` nor a platform config directory is available.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

/// Resolved locations of every file AdCraft reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdcraftPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AdcraftPaths {
    /// Resolves paths from `ADCRAFT_HOME`, falling back to the platform
    /// config and data directories.
    pub fn resolve() -> Result<Self, PathError> {
        if let Some(home) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            return Ok(Self::with_base(PathBuf::from(home)));
        }

        let config_dir = dirs::config_dir()
            .ok_or(PathError::HomeDirNotFound)?
            .join(APP_DIR);
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| config_dir.join("data"));

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Places everything under `base` (tests, `ADCRAFT_HOME`).
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            data_dir: base.join("data"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to `secret.json`. Keep this file at mode 600.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    pub fn session_file(&self) -> PathBuf {
        self.config_dir.join("session.toml")
    }

    pub fn creatives_dir(&self) -> PathBuf {
        self.data_dir.join("creatives")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    /// Ensures the secret file exists, creating a template if it doesn't.
    ///
    /// The template carries empty API keys for every provider. On Unix the
    /// file is created with permissions 600.
    pub fn ensure_secret_file(&self) -> std::io::Result<PathBuf> {
        let secret_path = self.secret_file();
        if secret_path.exists() {
            return Ok(secret_path);
        }

        std::fs::create_dir_all(&self.config_dir)?;

        let template = SecretConfig {
            claude: Some(ProviderSecret {
                api_key: String::new(),
                model_name: None,
            }),
            openai: Some(ProviderSecret {
                api_key: String::new(),
                model_name: None,
            }),
            gemini: Some(ProviderSecret {
                api_key: String::new(),
                model_name: None,
            }),
            rest: None,
        };
        let template_json = serde_json::to_string_pretty(&template).map_err(std::io::Error::other)?;
        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&secret_path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(secret_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_base_layout() {
        let paths = AdcraftPaths::with_base("/tmp/adcraft-test");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/adcraft-test/config.toml"));
        assert_eq!(paths.secret_file(), PathBuf::from("/tmp/adcraft-test/secret.json"));
        assert_eq!(paths.session_file(), PathBuf::from("/tmp/adcraft-test/session.toml"));
        assert_eq!(
            paths.creatives_dir(),
            PathBuf::from("/tmp/adcraft-test/data/creatives")
        );
        assert!(paths.logs_dir().starts_with(paths.config_dir()));
    }

    #[test]
    fn test_resolve_without_override() {
        if env::var_os(HOME_ENV).is_some() {
            return;
        }
        let paths = AdcraftPaths::resolve().unwrap();
        assert!(paths.config_dir().ends_with(APP_DIR));
        assert!(paths.config_file().ends_with("config.toml"));
    }

    #[test]
    fn test_ensure_secret_file_creates_template() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdcraftPaths::with_base(temp_dir.path());

        let path = paths.ensure_secret_file().unwrap();
        let parsed: SecretConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.claude.unwrap().api_key, "");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_ensure_secret_file_keeps_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdcraftPaths::with_base(temp_dir.path());
        std::fs::write(paths.secret_file(), r#"{"gemini":{"api_key":"kept"}}"#).unwrap();

        paths.ensure_secret_file().unwrap();
        let content = std::fs::read_to_string(paths.secret_file()).unwrap();
        assert!(content.contains("kept"));
    }
}
