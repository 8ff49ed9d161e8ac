use std::sync::Arc;

use logos_core::VocabularyCatalog;
use storage::Storage;

use crate::Clock;
use crate::config::AppConfig;
use crate::error::AppServicesError;
use crate::pronunciation::PronunciationService;
use crate::progress_service::ProgressService;
use crate::sessions::SessionLoopService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    config: AppConfig,
    catalog: Arc<VocabularyCatalog>,
    progress: Arc<ProgressService>,
    session_loop: Arc<SessionLoopService>,
    pronunciation: Arc<PronunciationService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage at `config.db_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(config: AppConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.db_url).await?;
        Ok(Self::with_storage(config, clock, storage))
    }

    /// Build services backed by in-memory storage.
    #[must_use]
    pub fn in_memory(config: AppConfig, clock: Clock) -> Self {
        Self::with_storage(config, clock, Storage::in_memory())
    }

    #[must_use]
    pub fn with_storage(config: AppConfig, clock: Clock, storage: Storage) -> Self {
        let catalog = Arc::new(VocabularyCatalog::builtin().clone());
        let progress = ProgressService::new(clock, Arc::clone(&catalog), storage.progress);
        let session_loop = SessionLoopService::new(
            clock,
            Arc::clone(&catalog),
            progress.clone(),
            config.session_size,
        );
        let pronunciation = PronunciationService::gemini(config.pronunciation.clone());

        Self {
            config,
            catalog,
            progress: Arc::new(progress),
            session_loop: Arc::new(session_loop),
            pronunciation: Arc::new(pronunciation),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<VocabularyCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }

    #[must_use]
    pub fn pronunciation(&self) -> Arc<PronunciationService> {
        Arc::clone(&self.pronunciation)
    }
}
