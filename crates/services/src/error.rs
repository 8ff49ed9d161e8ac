//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no words available for session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error("current word was already answered")]
    AlreadyAnswered,
    #[error("current word has not been answered yet")]
    NotAnswered,
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

/// Errors emitted by a `Pronouncer`.
///
/// These never reach the learner; `PronunciationService` logs and swallows them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PronunciationError {
    #[error("pronunciation is not configured")]
    NotConfigured,
    #[error("speech service returned no audio")]
    EmptyResponse,
    #[error("speech service request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid audio payload: {0}")]
    InvalidAudio(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
