use chrono::{DateTime, Utc};
use std::fmt;

use logos_core::model::{ProgressRecord, QuizMode, WordEntry, WordId};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── ANSWER RESULTS ────────────────────────────────────────────────────────────
//

/// Outcome of answering the current word, including the updated progress record.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub word_id: WordId,
    pub correct: bool,
    /// Normalized answer that would have been accepted.
    pub expected: String,
    /// Text to reveal after judging (full definition or the Greek word).
    pub reveal: String,
    pub record: ProgressRecord,
}

/// One entry of the session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAnswer {
    pub word_id: WordId,
    pub correct: bool,
}

/// Final result of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub score: usize,
    pub total: usize,
    pub mode: QuizMode,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Waiting for an answer to the current word.
    Presenting,
    /// Current word judged and recorded; waiting for the advance trigger.
    Revealed,
    Complete,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over a fixed list of words.
///
/// Steps through the words one at a time. Every word is answered exactly once and
/// then explicitly advanced past; the session completes when the cursor reaches
/// the end of the list.
pub struct QuizSession {
    mode: QuizMode,
    words: Vec<WordEntry>,
    cursor: usize,
    score: usize,
    history: Vec<SessionAnswer>,
    revealed: Option<AnswerOutcome>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over `words`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no words are provided.
    pub fn new(
        words: Vec<WordEntry>,
        mode: QuizMode,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            mode,
            words,
            cursor: 0,
            score: 0,
            history: Vec::new(),
            revealed: None,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of correct answers so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn history(&self) -> &[SessionAnswer] {
        &self.history
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.is_complete() {
            SessionStatus::Complete
        } else if self.revealed.is_some() {
            SessionStatus::Revealed
        } else {
            SessionStatus::Presenting
        }
    }

    /// The only word visible to the learner; `None` once complete.
    #[must_use]
    pub fn current_word(&self) -> Option<&WordEntry> {
        if self.is_complete() {
            return None;
        }
        self.words.get(self.cursor)
    }

    /// Prompt text of the current word for the session's mode.
    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.current_word().map(|word| self.mode.prompt(word))
    }

    /// Outcome of the current word while it is revealed.
    #[must_use]
    pub fn revealed(&self) -> Option<&AnswerOutcome> {
        self.revealed.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.total();
        SessionProgress {
            total,
            answered: self.history.len(),
            position: (self.cursor + 1).min(total),
            remaining: total.saturating_sub(self.history.len()),
            is_complete: self.is_complete(),
        }
    }

    /// Final report; `None` until the session completes.
    #[must_use]
    pub fn report(&self) -> Option<SessionReport> {
        self.completed_at.map(|completed_at| SessionReport {
            score: self.score,
            total: self.total(),
            mode: self.mode,
            started_at: self.started_at,
            completed_at,
        })
    }

    /// Judge a raw answer against the current word without changing state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after completion and
    /// `SessionError::AlreadyAnswered` while the current word is revealed.
    pub fn evaluate(&self, raw_answer: &str) -> Result<bool, SessionError> {
        let word = self.presenting_word()?;
        Ok(self.mode.evaluate(word, raw_answer))
    }

    pub(crate) fn presenting_word(&self) -> Result<&WordEntry, SessionError> {
        match self.status() {
            SessionStatus::Complete => Err(SessionError::Completed),
            SessionStatus::Revealed => Err(SessionError::AlreadyAnswered),
            SessionStatus::Presenting => self.words.get(self.cursor).ok_or(SessionError::Completed),
        }
    }

    /// Store the judged answer for the current word and reveal it.
    pub(crate) fn record_outcome(
        &mut self,
        outcome: AnswerOutcome,
    ) -> Result<&AnswerOutcome, SessionError> {
        let word_id = self.presenting_word()?.id().clone();
        debug_assert_eq!(word_id, outcome.word_id);

        if outcome.correct {
            self.score += 1;
        }
        self.history.push(SessionAnswer {
            word_id,
            correct: outcome.correct,
        });
        Ok(self.revealed.insert(outcome))
    }

    /// Move past the revealed word; completes the session after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after completion and
    /// `SessionError::NotAnswered` if the current word has not been answered.
    pub fn advance(&mut self, at: DateTime<Utc>) -> Result<SessionStatus, SessionError> {
        match self.status() {
            SessionStatus::Complete => return Err(SessionError::Completed),
            SessionStatus::Presenting => return Err(SessionError::NotAnswered),
            SessionStatus::Revealed => {}
        }

        self.revealed = None;
        self.cursor += 1;
        if self.cursor == self.words.len() {
            self.completed_at = Some(at);
        }
        Ok(self.status())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("mode", &self.mode)
            .field("words_len", &self.words.len())
            .field("cursor", &self.cursor)
            .field("score", &self.score)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use logos_core::time::fixed_now;

    fn word(id: &str, greek: &str, definition: &str) -> WordEntry {
        WordEntry::new(id, greek, "", definition, "noun", 1).unwrap()
    }

    fn session() -> QuizSession {
        QuizSession::new(
            vec![word("1", "θεός", "God, a god"), word("2", "καί", "and, even")],
            QuizMode::GreekToEnglish,
            fixed_now(),
        )
        .unwrap()
    }

    fn outcome_for(session: &QuizSession, raw: &str) -> AnswerOutcome {
        let entry = session.current_word().unwrap();
        let correct = session.evaluate(raw).unwrap();
        AnswerOutcome {
            word_id: entry.id().clone(),
            correct,
            expected: session.mode().expected_answer(entry),
            reveal: session.mode().reveal(entry).to_owned(),
            record: ProgressRecord::first_answer(entry.id().clone(), correct, fixed_now()),
        }
    }

    #[test]
    fn empty_session_returns_error() {
        let err = QuizSession::new(Vec::new(), QuizMode::default(), fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn presents_first_word_with_mode_prompt() {
        let s = session();
        assert_eq!(s.status(), SessionStatus::Presenting);
        assert_eq!(s.prompt(), Some("θεός"));
        assert_eq!(
            s.progress(),
            SessionProgress {
                total: 2,
                answered: 0,
                position: 1,
                remaining: 2,
                is_complete: false
            }
        );
    }

    #[test]
    fn answer_reveal_advance_cycle_completes() {
        let mut s = session();

        let out = outcome_for(&s, "  GOD ");
        s.record_outcome(out).unwrap();
        assert_eq!(s.status(), SessionStatus::Revealed);
        assert_eq!(s.revealed().unwrap().reveal, "God, a god");
        assert_eq!(s.advance(fixed_now()).unwrap(), SessionStatus::Presenting);

        let out = outcome_for(&s, "also");
        s.record_outcome(out).unwrap();
        assert_eq!(s.advance(fixed_now()).unwrap(), SessionStatus::Complete);

        assert!(s.is_complete());
        assert_eq!(s.current_word(), None);
        let report = s.report().unwrap();
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 2);
        assert_eq!(
            s.history(),
            &[
                SessionAnswer {
                    word_id: WordId::new("1"),
                    correct: true
                },
                SessionAnswer {
                    word_id: WordId::new("2"),
                    correct: false
                }
            ]
        );
        assert_eq!(s.progress().position, 2);
        assert_eq!(s.progress().remaining, 0);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut s = session();
        assert!(matches!(
            s.advance(fixed_now()),
            Err(SessionError::NotAnswered)
        ));
    }

    #[test]
    fn cannot_answer_twice_or_after_completion() {
        let mut s = QuizSession::new(
            vec![word("1", "ζωή", "life")],
            QuizMode::EnglishToGreek,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(s.prompt(), Some("life"));

        let out = outcome_for(&s, "ζωή");
        assert!(out.correct);
        s.record_outcome(out.clone()).unwrap();
        assert!(matches!(s.evaluate("ζωή"), Err(SessionError::AlreadyAnswered)));
        assert!(matches!(
            s.record_outcome(out),
            Err(SessionError::AlreadyAnswered)
        ));

        s.advance(fixed_now()).unwrap();
        assert!(matches!(s.evaluate("x"), Err(SessionError::Completed)));
        assert!(matches!(s.advance(fixed_now()), Err(SessionError::Completed)));
        assert_eq!(s.report().unwrap().score, 1);
    }

    #[test]
    fn report_is_absent_until_complete() {
        assert!(session().report().is_none());
    }
}
