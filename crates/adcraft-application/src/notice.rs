//! User-facing signals emitted by the library controller.

use adcraft_core::creative::{CreativeKind, RequiredField, ValidationError};
use std::fmt;
use std::sync::Arc;

/// Callback receiving every [`LibraryNotice`] (e.g. to show a toast).
pub type NoticeCallback = Arc<dyn Fn(LibraryNotice) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryNotice {
    /// A creative was generated and added.
    Generated {
        kind: CreativeKind,
        /// Kind-specific label, e.g. "Ad copy generated".
        label: &'static str,
        title: String,
        /// Whether storage acknowledged the write.
        confirmed: bool,
    },
    ValidationFailed {
        missing: Vec<RequiredField>,
    },
    GenerationFailed {
        message: String,
    },
    /// The record is shown locally but was not saved.
    PersistenceFailed {
        record_id: String,
        message: String,
    },
    LoadFailed {
        message: String,
    },
    /// The list was cleared because the signed-in user changed.
    Reset,
}

impl LibraryNotice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Generated { .. } | Self::Reset)
    }
}

impl fmt::Display for LibraryNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated {
                label, confirmed, ..
            } => {
                if *confirmed {
                    write!(f, "{label}")
                } else {
                    write!(f, "{label} (not saved)")
                }
            }
            Self::ValidationFailed { missing } => {
                let err = ValidationError {
                    missing: missing.clone(),
                };
                write!(f, "{err}")
            }
            Self::GenerationFailed { message } => write!(f, "Generation failed: {message}"),
            Self::PersistenceFailed { message, .. } => {
                write!(f, "Creative could not be saved: {message}")
            }
            Self::LoadFailed { message } => write!(f, "Failed to load library: {message}"),
            Self::Reset => write!(f, "Library cleared"),
        }
    }
}
