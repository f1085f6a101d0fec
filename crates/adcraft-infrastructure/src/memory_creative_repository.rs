//! In-memory CreativeRepository implementation.

use adcraft_core::Result;
use adcraft_core::creative::{CreativeQuery, CreativeRecord, CreativeRepository};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

/// Keeps creatives in process memory. `query` answers with a bare array.
#[derive(Debug, Default)]
pub struct InMemoryCreativeRepository {
    records: RwLock<Vec<CreativeRecord>>,
}

impl InMemoryCreativeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, e.g. with fixtures.
    pub fn with_records(records: Vec<CreativeRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of stored records across all owners.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CreativeRepository for InMemoryCreativeRepository {
    async fn query(&self, query: &CreativeQuery) -> Result<Value> {
        let matching = {
            let records = self.records.read().await;
            query.apply(records.iter().cloned())
        };
        Ok(serde_json::to_value(matching)?)
    }

    async fn create(&self, record: &CreativeRecord) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }
}
