//! TOML-backed CreativeRepository implementation.
//!
//! Each owner gets one file under the creatives directory, named by a UUID v5
//! of the owner id so arbitrary ids map to safe file names:
//!
//! ```text
//! creatives/
//! └── 3f1c...e2.toml
//!     [[creatives]]
//!     id = "..."
//!     kind = "copy"
//!     ...
//! ```

use crate::storage::AtomicTomlFile;
use adcraft_core::creative::{CreativeQuery, CreativeRecord, CreativeRepository};
use adcraft_core::{AdcraftError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CreativeFile {
    #[serde(default)]
    creatives: Vec<CreativeRecord>,
}

/// A repository storing each owner's creatives in its own TOML file.
///
/// `query` answers with the wrapped `{ "data": [...] }` shape.
#[derive(Debug, Clone)]
pub struct FileCreativeRepository {
    base_dir: PathBuf,
}

impl FileCreativeRepository {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn owner_file(&self, owner_id: &str) -> AtomicTomlFile<CreativeFile> {
        let file_id = Uuid::new_v5(&Uuid::NAMESPACE_OID, owner_id.as_bytes());
        AtomicTomlFile::new(self.base_dir.join(format!("{file_id}.toml")))
    }
}

#[async_trait]
impl CreativeRepository for FileCreativeRepository {
    async fn query(&self, query: &CreativeQuery) -> Result<Value> {
        let file = self.owner_file(&query.owner_id);
        let query = query.clone();

        let records = tokio::task::spawn_blocking(move || {
            let stored = file.load()?.unwrap_or_default();
            Ok::<_, AdcraftError>(query.apply(stored.creatives))
        })
        .await
        .map_err(|e| AdcraftError::internal(format!("Storage task failed: {e}")))??;

        tracing::debug!(target: "storage", count = records.len(), "Loaded creatives from file");
        Ok(json!({ "data": records }))
    }

    async fn create(&self, record: &CreativeRecord) -> Result<()> {
        let file = self.owner_file(&record.owner_id);
        let record = record.clone();
        let record_id = record.id.clone();

        tokio::task::spawn_blocking(move || {
            file.update(CreativeFile::default(), |stored| {
                stored.creatives.push(record);
                Ok(())
            })
        })
        .await
        .map_err(|e| AdcraftError::internal(format!("Storage task failed: {e}")))??;

        tracing::debug!(target: "storage", id = %record_id, "Saved creative to file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcraft_core::creative::CreativeKind;
    use adcraft_core::normalizer::normalize;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn record(id: &str, owner: &str, minutes: i64) -> CreativeRecord {
        CreativeRecord {
            id: id.to_string(),
            kind: CreativeKind::Visual,
            title: "Visual Concepts for Cold Brew".to_string(),
            content: "Concept 1".to_string(),
            industry: "Coffee".to_string(),
            tone: "playful".to_string(),
            platform: "Instagram".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
                + Duration::minutes(minutes),
            owner_id: owner.to_string(),
            confirmed: false,
        }
    }

    #[tokio::test]
    async fn test_query_returns_wrapped_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileCreativeRepository::new(temp_dir.path());

        repo.create(&record("first", "alice@example.com", 0)).await.unwrap();
        repo.create(&record("second", "alice@example.com", 5)).await.unwrap();

        let raw = repo
            .query(&CreativeQuery::for_owner("alice@example.com", 50))
            .await
            .unwrap();
        assert!(raw.get("data").is_some_and(Value::is_array));

        let records = normalize(raw);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["second", "first"]);
        assert!(records.iter().all(|r| r.confirmed));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_all_stored() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileCreativeRepository::new(temp_dir.path());

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(&record(&format!("r{i}"), "alice", i)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let records = normalize(repo.query(&CreativeQuery::for_owner("alice", 100)).await.unwrap());
        assert_eq!(records.len(), 32);
        assert_eq!(records[0].id, "r31");
    }

    #[tokio::test]
    async fn test_owners_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileCreativeRepository::new(temp_dir.path());

        repo.create(&record("a1", "alice", 0)).await.unwrap();
        repo.create(&record("b1", "bob", 0)).await.unwrap();

        let bob = normalize(repo.query(&CreativeQuery::for_owner("bob", 50)).await.unwrap());
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].id, "b1");
    }

    #[tokio::test]
    async fn test_query_respects_limit() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileCreativeRepository::new(temp_dir.path());
        for i in 0..4 {
            repo.create(&record(&format!("r{i}"), "alice", i)).await.unwrap();
        }

        let records = normalize(repo.query(&CreativeQuery::for_owner("alice", 2)).await.unwrap());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "r3");
    }

    #[tokio::test]
    async fn test_unknown_owner_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileCreativeRepository::new(temp_dir.path());

        let raw = repo.query(&CreativeQuery::for_owner("nobody", 50)).await.unwrap();
        assert_eq!(raw, json!({ "data": [] }));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileCreativeRepository::new(temp_dir.path());
        std::fs::write(repo.owner_file("alice").path(), "[[creatives]\n").unwrap();

        let err = repo
            .query(&CreativeQuery::for_owner("alice", 50))
            .await
            .unwrap_err();
        assert!(err.is_serialization());
    }
}
