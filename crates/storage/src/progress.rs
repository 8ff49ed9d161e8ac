use async_trait::async_trait;
use std::sync::Arc;

use logos_core::model::ProgressMap;

use crate::repository::{KeyValueStore, StorageError};
use crate::snapshot;

/// Key under which the progress snapshot is stored.
pub const PROGRESS_KEY: &str = "logos_progress";

/// Repository contract for the learner's progress.
///
/// The mapping is always read and written as a whole.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the current mapping, surfacing backend read failures.
    ///
    /// A missing or corrupt snapshot is not an error and yields an empty mapping.
    /// Callers about to write the mapping back must use this method.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn try_load_progress(&self) -> Result<ProgressMap, StorageError>;

    /// Load the current mapping for display.
    ///
    /// Never fails: an unreadable backend yields an empty mapping.
    async fn load_progress(&self) -> ProgressMap {
        self.try_load_progress().await.unwrap_or_else(|err| {
            log::warn!("progress store unreadable, showing empty progress: {err}");
            ProgressMap::new()
        })
    }

    /// Replace the stored mapping with `progress`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be encoded or written.
    async fn save_progress(&self, progress: &ProgressMap) -> Result<(), StorageError>;

    /// Clear all progress. Equivalent to saving an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the empty snapshot cannot be written.
    async fn reset_progress(&self) -> Result<(), StorageError> {
        self.save_progress(&ProgressMap::new()).await
    }
}

/// Progress repository storing a JSON snapshot under a single key.
#[derive(Clone)]
pub struct KvProgressRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KvProgressRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, PROGRESS_KEY)
    }

    #[must_use]
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl ProgressRepository for KvProgressRepository {
    async fn try_load_progress(&self) -> Result<ProgressMap, StorageError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(ProgressMap::new());
        };

        match snapshot::decode(&raw) {
            Ok(progress) => {
                log::debug!("loaded progress for {} words", progress.len());
                Ok(progress)
            }
            Err(err) => {
                log::warn!("discarding corrupt progress snapshot: {err}");
                Ok(ProgressMap::new())
            }
        }
    }

    async fn save_progress(&self, progress: &ProgressMap) -> Result<(), StorageError> {
        let raw = snapshot::encode(progress)?;
        self.store.put(&self.key, &raw).await
    }
}
