use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::snapshot::{
    PROGRESS_KEY, QuizSnapshot, SCORE_KEY, decode_progress, decode_score, encode_progress,
    encode_score,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Minimal string key-value contract, the shape of browser-style local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Write several values. Backends that support it apply them atomically.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any value cannot be stored.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value).await?;
        }
        Ok(())
    }
}

/// Load/save contract consumed by the quiz.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Load the stored snapshot; an empty store yields the default snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures or corrupt values.
    async fn load(&self) -> Result<QuizSnapshot, StorageError>;

    /// Persist the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn save(&self, snapshot: &QuizSnapshot) -> Result<(), StorageError>;
}

/// `SnapshotRepository` over any key-value store, using the `score` / `progress` keys.
#[derive(Clone)]
pub struct KeyValueSnapshots<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueSnapshots<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: KeyValueStore> SnapshotRepository for KeyValueSnapshots<S> {
    async fn load(&self) -> Result<QuizSnapshot, StorageError> {
        let score = self.store.get(SCORE_KEY).await?;
        let progress = self.store.get(PROGRESS_KEY).await?;
        Ok(QuizSnapshot {
            score: decode_score(score.as_deref())?,
            counts: decode_progress(progress.as_deref())?,
        })
    }

    async fn save(&self, snapshot: &QuizSnapshot) -> Result<(), StorageError> {
        let entries = [
            (SCORE_KEY, encode_score(snapshot.score)?),
            (PROGRESS_KEY, encode_progress(&snapshot.counts)?),
        ];
        self.store.set_many(&entries).await
    }
}

/// Simple in-memory store for testing and throwaway sessions.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Aggregates the quiz repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub snapshots: Arc<dyn SnapshotRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let snapshots: Arc<dyn SnapshotRepository> =
            Arc::new(KeyValueSnapshots::new(InMemoryStore::new()));
        Self { snapshots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Score, Table};
    use std::collections::BTreeMap;

    fn table(value: u32) -> Table {
        Table::new(value).unwrap()
    }

    #[tokio::test]
    async fn empty_store_loads_defaults() {
        let repo = KeyValueSnapshots::new(InMemoryStore::new());
        let snapshot = repo.load().await.unwrap();
        assert_eq!(snapshot, QuizSnapshot::default());
    }

    #[tokio::test]
    async fn round_trips_snapshot_through_keys() {
        let store = InMemoryStore::new();
        let repo = KeyValueSnapshots::new(store.clone());
        let snapshot = QuizSnapshot {
            score: Score::new(70),
            counts: BTreeMap::from([(table(2), 7), (table(3), 0)]),
        };
        repo.save(&snapshot).await.unwrap();

        assert_eq!(store.get(SCORE_KEY).await.unwrap().as_deref(), Some("70"));
        assert_eq!(
            store.get(PROGRESS_KEY).await.unwrap().as_deref(),
            Some(r#"{"2":7,"3":0}"#)
        );
        assert_eq!(repo.load().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn corrupt_progress_is_a_serialization_error() {
        let store = InMemoryStore::new();
        store.set(SCORE_KEY, "30").await.unwrap();
        store.set(PROGRESS_KEY, "[1,2").await.unwrap();
        let err = KeyValueSnapshots::new(store).load().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn storage_in_memory_is_usable() {
        let storage = Storage::in_memory();
        let snapshot = QuizSnapshot {
            score: Score::new(10),
            counts: BTreeMap::from([(table(2), 1)]),
        };
        storage.snapshots.save(&snapshot).await.unwrap();
        assert_eq!(storage.snapshots.load().await.unwrap(), snapshot);
    }
}
