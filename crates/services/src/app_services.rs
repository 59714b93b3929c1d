use std::sync::Arc;

use quiz_core::QuizConfig;
use storage::Storage;

use crate::error::AppServicesError;
use crate::media::{SoundPlayer, Speaker};
use crate::quiz_service::QuizService;

/// Assembles app-facing services over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self { storage })
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            storage: Storage::in_memory(),
        }
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Start a quiz session over this storage.
    pub async fn start_quiz(
        &self,
        config: QuizConfig,
        sound: Arc<dyn SoundPlayer>,
        speaker: Arc<dyn Speaker>,
    ) -> QuizService {
        QuizService::start(
            config,
            Arc::clone(&self.storage.snapshots),
            sound,
            speaker,
        )
        .await
    }
}
