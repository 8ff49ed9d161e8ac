use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use thiserror::Error;

use crate::model::ids::WordId;

/// Upper bound of the mastery level.
pub const MAX_LEVEL: f64 = 5.0;
/// Lower bound of the mastery level.
pub const MIN_LEVEL: f64 = 0.0;
/// Level gained by a correct answer on an already tracked word.
pub const CORRECT_STEP: f64 = 0.5;
/// Level lost by an incorrect answer on an already tracked word.
pub const INCORRECT_STEP: f64 = 1.0;
/// Level at or above which a word counts as mastered.
pub const MASTERED_LEVEL: f64 = 3.0;

const FIRST_CORRECT_LEVEL: f64 = 1.0;
const FIRST_INCORRECT_LEVEL: f64 = 0.0;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("word id cannot be empty")]
    EmptyWordId,

    #[error("mastery level {level} for word {word_id} is outside [0, 5]")]
    InvalidLevel { word_id: WordId, level: f64 },

    #[error("duplicate progress record for word {0}")]
    DuplicateWord(WordId),
}

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// Cumulative answer statistics for one word.
///
/// A record only exists once the word has been answered at least once; a missing
/// record means "never tested", which is distinct from a record at level 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    word_id: WordId,
    correct_count: u32,
    incorrect_count: u32,
    last_tested: DateTime<Utc>,
    level: f64,
}

impl ProgressRecord {
    /// Create the record for a word's first answer.
    ///
    /// First answers do not use the step rule: a correct answer starts at level 1,
    /// an incorrect one at level 0.
    #[must_use]
    pub fn first_answer(word_id: WordId, correct: bool, answered_at: DateTime<Utc>) -> Self {
        Self {
            word_id,
            correct_count: u32::from(correct),
            incorrect_count: u32::from(!correct),
            last_tested: answered_at,
            level: if correct {
                FIRST_CORRECT_LEVEL
            } else {
                FIRST_INCORRECT_LEVEL
            },
        }
    }

    /// Rehydrate a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the id is blank or the level is not a finite value
    /// within `[0, 5]`.
    pub fn from_persisted(
        word_id: WordId,
        correct_count: u32,
        incorrect_count: u32,
        last_tested: DateTime<Utc>,
        level: f64,
    ) -> Result<Self, ProgressError> {
        if word_id.is_blank() {
            return Err(ProgressError::EmptyWordId);
        }
        if !level.is_finite() || !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(ProgressError::InvalidLevel { word_id, level });
        }

        Ok(Self {
            word_id,
            correct_count,
            incorrect_count,
            last_tested,
            level,
        })
    }

    /// Fold one more answer into an existing record.
    ///
    /// Correct: `+0.5` capped at 5. Incorrect: `-1` floored at 0.
    pub fn apply_answer(&mut self, correct: bool, answered_at: DateTime<Utc>) {
        if correct {
            self.correct_count = self.correct_count.saturating_add(1);
            self.level = (self.level + CORRECT_STEP).min(MAX_LEVEL);
        } else {
            self.incorrect_count = self.incorrect_count.saturating_add(1);
            self.level = (self.level - INCORRECT_STEP).max(MIN_LEVEL);
        }
        self.last_tested = answered_at;
    }

    #[must_use]
    pub fn word_id(&self) -> &WordId {
        &self.word_id
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    #[must_use]
    pub fn last_tested(&self) -> DateTime<Utc> {
        self.last_tested
    }

    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.level >= MASTERED_LEVEL
    }

    /// Level as a share of the maximum, in percent.
    #[must_use]
    pub fn mastery_percent(&self) -> f64 {
        self.level / MAX_LEVEL * 100.0
    }
}

//
// ─── PROGRESS MAP ──────────────────────────────────────────────────────────────
//

/// All progress records of the learner, keyed by word id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressMap {
    records: BTreeMap<WordId, ProgressRecord>,
}

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from persisted records.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::DuplicateWord` if two records share a word id.
    pub fn from_records(
        records: impl IntoIterator<Item = ProgressRecord>,
    ) -> Result<Self, ProgressError> {
        let mut map = BTreeMap::new();
        for record in records {
            match map.entry(record.word_id.clone()) {
                Entry::Occupied(_) => return Err(ProgressError::DuplicateWord(record.word_id)),
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
            }
        }
        Ok(Self { records: map })
    }

    /// Apply an answer for a word, creating its record on first use.
    pub fn record_answer(
        &mut self,
        word_id: &WordId,
        correct: bool,
        answered_at: DateTime<Utc>,
    ) -> &ProgressRecord {
        match self.records.entry(word_id.clone()) {
            Entry::Occupied(slot) => {
                let record = slot.into_mut();
                record.apply_answer(correct, answered_at);
                record
            }
            Entry::Vacant(slot) => slot.insert(ProgressRecord::first_answer(
                word_id.clone(),
                correct,
                answered_at,
            )),
        }
    }

    #[must_use]
    pub fn get(&self, word_id: &WordId) -> Option<&ProgressRecord> {
        self.records.get(word_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ProgressRecord> {
        self.records.values()
    }

    /// Mastery percent of a word; untested words are at 0.
    #[must_use]
    pub fn mastery_percent(&self, word_id: &WordId) -> f64 {
        self.get(word_id).map_or(0.0, ProgressRecord::mastery_percent)
    }
}
