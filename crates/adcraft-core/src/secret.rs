//! Access to provider and storage credentials.

use crate::config::SecretConfig;
use crate::error::Result;

/// Loads `secret.json`.
///
/// Implementations keep the file at mode 600 on Unix and never put key
/// material into logs or error messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Reads the credentials. A missing file yields an empty [`SecretConfig`]
    /// so environment fallbacks can apply.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    async fn secret_file_exists(&self) -> bool;
}
