use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{KeyValueStore, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

const UPSERT: &str = r"
    INSERT INTO kv_entries (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
";

#[async_trait]
impl KeyValueStore for SqliteRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(UPSERT)
            .bind(key)
            .bind(value)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for (key, value) in entries {
            sqlx::query(UPSERT)
                .bind(*key)
                .bind(value.as_str())
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
