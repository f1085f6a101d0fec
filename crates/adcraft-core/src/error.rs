//! Error types for the AdCraft domain and storage layers.

use thiserror::Error;

/// Failure reported by storage, configuration and session backends.
///
/// The application layer turns it into a library notice without caring which
/// backend produced it.
#[derive(Error, Debug, Clone)]
pub enum AdcraftError {
    /// File system failure
    #[error("IO error: {message}")]
    Io { message: String },

    /// The creative store rejected or could not serve a request
    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdcraftError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for AdcraftError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AdcraftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AdcraftError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for AdcraftError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AdcraftError>`.
pub type Result<T> = std::result::Result<T, AdcraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: AdcraftError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked").into();
        match err {
            AdcraftError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: AdcraftError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }
}
