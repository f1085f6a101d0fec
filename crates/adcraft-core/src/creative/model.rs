//! CreativeRecord domain model.

use super::kind::CreativeKind;
use super::request::GenerationRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated creative as stored in a user's library.
///
/// Records are immutable once created. The only field that changes meaning
/// over a record's life is `confirmed`, which is local bookkeeping and is
/// never written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// Which kind of creative this is.
    pub kind: CreativeKind,
    /// Display title, e.g. "Ad Copy for Running Shoes".
    pub title: String,
    /// Generated text.
    pub content: String,
    pub industry: String,
    pub tone: String,
    pub platform: String,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Identity of the user who owns this record.
    pub owner_id: String,
    /// `false` while the durable write has not been acknowledged.
    ///
    /// Anything read back from storage has, by definition, landed there.
    #[serde(skip_serializing, default = "confirmed_by_storage")]
    pub confirmed: bool,
}

fn confirmed_by_storage() -> bool {
    true
}

impl CreativeRecord {
    /// Builds a fresh, not-yet-confirmed record from a successful generation.
    pub fn from_generation(
        request: &GenerationRequest,
        title: String,
        content: String,
        owner_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: request.kind,
            title,
            content,
            industry: request.industry.clone(),
            tone: request.effective_tone().to_string(),
            platform: request.effective_platform().to_string(),
            created_at,
            owner_id: owner_id.into(),
            confirmed: false,
        }
    }

    /// Returns the record marked as acknowledged by storage.
    pub fn into_confirmed(mut self) -> Self {
        self.confirmed = true;
        self
    }
}
