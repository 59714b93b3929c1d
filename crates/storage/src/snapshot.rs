//! Persisted `{score, progress}` pair and its key-value wire format.
//!
//! Two keys are written:
//! - `score`: the score as a plain decimal string, e.g. `"120"`
//! - `progress`: a JSON object from table id to correct count, e.g. `{"2":10,"3":2}`

use std::collections::BTreeMap;

use quiz_core::model::{Progress, Score, Table, TableSet};

use crate::repository::StorageError;

pub const SCORE_KEY: &str = "score";
pub const PROGRESS_KEY: &str = "progress";

/// Storage-side view of quiz progress, independent of any table set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub score: Score,
    pub counts: BTreeMap<Table, u32>,
}

impl QuizSnapshot {
    #[must_use]
    pub fn capture(score: Score, progress: &Progress) -> Self {
        Self {
            score,
            counts: progress.iter().collect(),
        }
    }

    /// Counts restricted to `tables`, zero for tables never stored.
    #[must_use]
    pub fn progress_for(&self, tables: &TableSet) -> Progress {
        Progress::from_counts(tables, self.counts.iter().map(|(t, c)| (*t, *c)))
    }
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Encodes the score as a bare JSON number, which is also its decimal string.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_score(score: Score) -> Result<String, StorageError> {
    serde_json::to_string(&score).map_err(ser)
}

/// Encodes counts as a JSON object keyed by the table id string.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_progress(counts: &BTreeMap<Table, u32>) -> Result<String, StorageError> {
    serde_json::to_string(counts).map_err(ser)
}

/// Decodes a stored score; a missing value is zero.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for anything but a non-negative integer.
pub fn decode_score(raw: Option<&str>) -> Result<Score, StorageError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Score::default()),
        Some(value) => serde_json::from_str::<Score>(value)
            .map_err(|e| StorageError::Serialization(format!("score {value:?}: {e}"))),
    }
}

/// Decodes stored progress; a missing value is empty.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for invalid JSON, non-table keys or negative counts.
pub fn decode_progress(raw: Option<&str>) -> Result<BTreeMap<Table, u32>, StorageError> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(BTreeMap::new());
    };
    serde_json::from_str(raw).map_err(|e| StorageError::Serialization(format!("progress: {e}")))
}
