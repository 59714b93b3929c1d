//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuizService` operations that must report persistence failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
