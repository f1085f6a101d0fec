//! Errors returned by library operations.

use adcraft_core::AdcraftError;
use adcraft_core::creative::ValidationError;
use adcraft_core::generation::GenerationError;
use adcraft_core::prompt::PromptError;
use thiserror::Error;

/// Why a library operation did not complete.
///
/// A failed durable write is not represented here: the generated record is
/// kept with `confirmed == false` and a notice is emitted instead.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Required form fields were blank. Nothing changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `generate` was called with no signed-in user.
    #[error("Sign in to generate creatives")]
    Unauthenticated,

    /// The prompt template failed to render.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The text-generation capability failed; no record was created.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The library query failed; the list was emptied.
    #[error("Failed to load library: {0}")]
    Load(#[source] AdcraftError),
}

impl LibraryError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_) | Self::Prompt(_))
    }
}
