use std::sync::Arc;

use rand::Rng;

use logos_core::{VocabularyCatalog, model::QuizMode, time::Clock};

use super::plan::SessionBuilder;
use super::service::{AnswerOutcome, QuizSession, SessionStatus};
use crate::error::SessionError;
use crate::progress_service::ProgressService;

/// Starts quiz sessions and persists every answer through `ProgressService`.
#[derive(Clone)]
pub struct SessionLoopService {
    clock: Clock,
    catalog: Arc<VocabularyCatalog>,
    progress: ProgressService,
    session_size: usize,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<VocabularyCatalog>,
        progress: ProgressService,
        session_size: usize,
    ) -> Self {
        Self {
            clock,
            catalog,
            progress,
            session_size,
        }
    }

    #[must_use]
    pub fn session_size(&self) -> usize {
        self.session_size
    }

    /// Start a session over a fresh random selection of catalog words.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no words could be selected.
    pub fn start_session(&self, mode: QuizMode) -> Result<QuizSession, SessionError> {
        self.start_session_with_rng(mode, &mut rand::rng())
    }

    /// Same as `start_session`, drawing the selection from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no words could be selected.
    pub fn start_session_with_rng<R: Rng + ?Sized>(
        &self,
        mode: QuizMode,
        rng: &mut R,
    ) -> Result<QuizSession, SessionError> {
        let plan = SessionBuilder::new(&self.catalog)
            .with_size(self.session_size)
            .build_with_rng(rng);
        let session = QuizSession::new(plan.words, mode, self.clock.now())?;
        log::info!(
            "started {} session with {} words",
            session.mode(),
            session.total()
        );
        Ok(session)
    }

    /// Judge `raw_answer` for the current word, persist it, and reveal the result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyAnswered` or `SessionError::Completed` when
    /// the session is not waiting for an answer, and `SessionError::Progress` if
    /// saving fails. The session is left unchanged on error.
    pub async fn submit_answer(
        &self,
        session: &mut QuizSession,
        raw_answer: &str,
    ) -> Result<AnswerOutcome, SessionError> {
        let word = session.presenting_word()?;
        let mode = session.mode();
        let correct = mode.evaluate(word, raw_answer);
        let word_id = word.id().clone();
        let expected = mode.expected_answer(word);
        let reveal = mode.reveal(word).to_owned();

        let record = self.progress.record_answer(&word_id, correct).await?;

        let outcome = AnswerOutcome {
            word_id,
            correct,
            expected,
            reveal,
            record,
        };
        session.record_outcome(outcome).cloned()
    }

    /// Move to the next word, completing the session after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAnswered` or `SessionError::Completed` when
    /// there is no revealed word to move past.
    pub fn advance(&self, session: &mut QuizSession) -> Result<SessionStatus, SessionError> {
        let status = session.advance(self.clock.now())?;
        if status == SessionStatus::Complete {
            log::info!(
                "session complete: {}/{} correct",
                session.score(),
                session.total()
            );
        }
        Ok(status)
    }
}
