//! Creative repository trait.
//!
//! Defines the persistence boundary for the library. Query results are
//! deliberately untyped: backends differ in how they wrap a result set, and
//! [`crate::normalizer`] is the single place that resolves the shape.

use super::model::CreativeRecord;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of records fetched for a library view.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Sort order for a library query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first.
    #[default]
    CreatedAtDesc,
    /// Oldest first.
    CreatedAtAsc,
}

/// A scoped library read: records owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeQuery {
    /// Equality filter on `owner_id`.
    pub owner_id: String,
    pub order: SortOrder,
    pub limit: usize,
}

impl CreativeQuery {
    /// Newest-first query for `owner_id`, bounded by `limit`.
    pub fn for_owner(owner_id: impl Into<String>, limit: usize) -> Self {
        Self {
            owner_id: owner_id.into(),
            order: SortOrder::CreatedAtDesc,
            limit,
        }
    }

    /// Applies this query's filter, order and limit to an in-memory set.
    ///
    /// Backends without a query engine of their own use this so that every
    /// store answers the same query identically.
    pub fn apply(&self, records: impl IntoIterator<Item = CreativeRecord>) -> Vec<CreativeRecord> {
        let mut matching: Vec<CreativeRecord> = records
            .into_iter()
            .filter(|record| record.owner_id == self.owner_id)
            .collect();

        match self.order {
            SortOrder::CreatedAtDesc => matching.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::CreatedAtAsc => matching.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }

        matching.truncate(self.limit);
        matching
    }
}

/// An abstract repository for persisting creatives.
///
/// Implementations decide the concrete storage (TOML files, an HTTP
/// collection, memory) and the JSON shape returned by [`query`](Self::query).
#[async_trait]
pub trait CreativeRepository: Send + Sync {
    /// Runs a scoped query and returns the backend's raw response.
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: Whatever the backend produced; may be an array, a
    ///   `{ "data": [...] }` wrapper or something else entirely
    /// - `Err(_)`: The query itself could not be executed
    async fn query(&self, query: &CreativeQuery) -> Result<Value>;

    /// Persists a newly generated record.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The backend acknowledged the write
    /// - `Err(_)`: The write failed or could not be confirmed
    async fn create(&self, record: &CreativeRecord) -> Result<()>;
}
