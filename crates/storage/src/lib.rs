#![forbid(unsafe_code)]

pub mod repository;
pub mod snapshot;
pub mod sqlite;

pub use repository::{
    InMemoryStore, KeyValueSnapshots, KeyValueStore, SnapshotRepository, Storage, StorageError,
};
pub use snapshot::QuizSnapshot;
