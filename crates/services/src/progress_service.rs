use std::sync::Arc;

use logos_core::{
    VocabularyCatalog,
    model::{MasterySummary, ProgressMap, ProgressRecord, WordEntry, WordId},
    time::Clock,
};
use storage::ProgressRepository;

use crate::error::ProgressServiceError;

/// A catalog word paired with the learner's record for it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    pub word: WordEntry,
    pub record: Option<ProgressRecord>,
}

impl LexiconEntry {
    #[must_use]
    pub fn mastery_percent(&self) -> f64 {
        self.record
            .as_ref()
            .map_or(0.0, ProgressRecord::mastery_percent)
    }
}

/// Proof that a reset was requested; consumed by `ProgressService::confirm_reset`.
#[derive(Debug)]
#[must_use = "a reset only happens once the request is confirmed"]
pub struct ResetRequest {
    words_seen: usize,
}

impl ResetRequest {
    /// Number of records that a confirmed reset will erase.
    #[must_use]
    pub fn words_seen(&self) -> usize {
        self.words_seen
    }
}

/// Reads and writes learner progress through a `ProgressRepository`.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    catalog: Arc<VocabularyCatalog>,
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<VocabularyCatalog>,
        repo: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            repo,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &VocabularyCatalog {
        &self.catalog
    }

    /// Current progress; missing or unreadable data yields an empty map.
    pub async fn load(&self) -> ProgressMap {
        self.repo.load_progress().await
    }

    pub async fn summary(&self) -> MasterySummary {
        let progress = self.load().await;
        MasterySummary::from_progress(&progress, self.catalog.len())
    }

    pub async fn mastery_percent(&self, word_id: &WordId) -> f64 {
        self.load().await.mastery_percent(word_id)
    }

    /// Apply one judged answer and persist the whole progress map.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the stored mapping cannot be read
    /// or the updated one cannot be saved; nothing is recorded in either case.
    pub async fn record_answer(
        &self,
        word_id: &WordId,
        correct: bool,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let mut progress = self.repo.try_load_progress().await?;
        let record = progress
            .record_answer(word_id, correct, self.clock.now())
            .clone();
        self.repo.save_progress(&progress).await?;

        log::debug!(
            "recorded answer for word {word_id}: correct={correct} level={}",
            record.level()
        );
        Ok(record)
    }

    /// Catalog words matching `term`, each joined with its progress record.
    pub async fn lexicon(&self, term: &str) -> Vec<LexiconEntry> {
        let progress = self.load().await;
        self.catalog
            .search(term)
            .map(|word| LexiconEntry {
                record: progress.get(word.id()).cloned(),
                word: word.clone(),
            })
            .collect()
    }

    /// First step of a reset; nothing is erased until the request is confirmed.
    pub async fn request_reset(&self) -> ResetRequest {
        ResetRequest {
            words_seen: self.load().await.len(),
        }
    }

    /// Erase all progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the empty snapshot cannot be saved.
    pub async fn confirm_reset(&self, request: ResetRequest) -> Result<(), ProgressServiceError> {
        self.repo.reset_progress().await?;
        log::info!("progress reset ({} words cleared)", request.words_seen);
        Ok(())
    }
}
