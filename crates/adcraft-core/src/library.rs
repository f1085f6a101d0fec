//! In-memory library state.

use crate::creative::CreativeRecord;
use serde::Serialize;

/// Records shown to the signed-in user, newest first, plus the
/// generation-in-progress flag.
///
/// Order is maintained by construction: [`replace`](Self::replace) takes the
/// newest-first query result and [`prepend`](Self::prepend) adds at the front.
/// Nothing here re-sorts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryState {
    pub records: Vec<CreativeRecord>,
    pub is_generating: bool,
}

impl LibraryState {
    /// Replaces the whole list with a freshly loaded one.
    pub fn replace(&mut self, records: Vec<CreativeRecord>) {
        self.records = records;
    }

    /// Adds a newly generated record at index 0.
    pub fn prepend(&mut self, record: CreativeRecord) {
        self.records.insert(0, record);
    }

    /// Drops all records. Used on sign-out and user switch.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Step of a single generation attempt, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum GenerationPhase {
    Idle,
    Validating,
    Requesting,
    Persisting,
}
