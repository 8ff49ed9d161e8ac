//! JSON snapshot format of the progress store.
//!
//! The whole mapping is one JSON array of records:
//!
//! ```json
//! [{"wordId":"2","correctCount":1,"incorrectCount":0,"lastTested":1700000000000,"level":1}]
//! ```
//!
//! `lastTested` is milliseconds since the Unix epoch.

use chrono::{DateTime, Utc};
use logos_core::model::{ProgressMap, ProgressRecord, WordId};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// Persisted shape of a progress record.
///
/// Mirrors the domain `ProgressRecord` so the snapshot format stays out of the
/// domain layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRow {
    pub word_id: WordId,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub last_tested: i64,
    pub level: f64,
}

impl ProgressRow {
    #[must_use]
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            word_id: record.word_id().clone(),
            correct_count: record.correct_count(),
            incorrect_count: record.incorrect_count(),
            last_tested: record.last_tested().timestamp_millis(),
            level: record.level(),
        }
    }

    /// Convert the row back into a domain record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the timestamp is out of range or the
    /// record fails domain validation.
    pub fn into_record(self) -> Result<ProgressRecord, StorageError> {
        let last_tested = DateTime::<Utc>::from_timestamp_millis(self.last_tested).ok_or_else(
            || StorageError::Serialization(format!("invalid lastTested: {}", self.last_tested)),
        )?;
        ProgressRecord::from_persisted(
            self.word_id,
            self.correct_count,
            self.incorrect_count,
            last_tested,
            self.level,
        )
        .map_err(ser)
    }
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Serialize the full mapping as one JSON array.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode(progress: &ProgressMap) -> Result<String, StorageError> {
    let rows: Vec<ProgressRow> = progress.records().map(ProgressRow::from_record).collect();
    serde_json::to_string(&rows).map_err(ser)
}

/// Parse a JSON snapshot into a mapping.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON, invalid records, or
/// duplicate word ids.
pub fn decode(raw: &str) -> Result<ProgressMap, StorageError> {
    let rows: Vec<ProgressRow> = serde_json::from_str(raw).map_err(ser)?;
    let records = rows
        .into_iter()
        .map(ProgressRow::into_record)
        .collect::<Result<Vec<_>, _>>()?;
    ProgressMap::from_records(records).map_err(ser)
}
