use thiserror::Error;

use crate::model::ids::WordId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("word id cannot be empty")]
    EmptyId,

    #[error("word text cannot be empty (id {0})")]
    EmptyWord(WordId),

    #[error("definition cannot be empty (id {0})")]
    EmptyDefinition(WordId),
}

//
// ─── WORD ENTRY ────────────────────────────────────────────────────────────────
//

/// A single vocabulary item of the catalog.
///
/// `definition` is a comma-separated list of English senses. The first sense is the
/// canonical answer when translating into English.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    id: WordId,
    word: String,
    transliteration: String,
    definition: String,
    part_of_speech: String,
    frequency: u32,
    example: Option<String>,
}

impl WordEntry {
    /// Build and validate a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `WordError` if the id, word, or definition is blank.
    pub fn new(
        id: impl Into<WordId>,
        word: impl Into<String>,
        transliteration: impl Into<String>,
        definition: impl Into<String>,
        part_of_speech: impl Into<String>,
        frequency: u32,
    ) -> Result<Self, WordError> {
        let id = id.into();
        if id.is_blank() {
            return Err(WordError::EmptyId);
        }

        let word = word.into().trim().to_owned();
        if word.is_empty() {
            return Err(WordError::EmptyWord(id));
        }

        let definition = definition.into().trim().to_owned();
        if definition.is_empty() {
            return Err(WordError::EmptyDefinition(id));
        }

        Ok(Self {
            id,
            word,
            transliteration: transliteration.into().trim().to_owned(),
            definition,
            part_of_speech: part_of_speech.into().trim().to_owned(),
            frequency,
            example: None,
        })
    }

    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        let example = example.into();
        self.example = (!example.trim().is_empty()).then_some(example);
        self
    }

    #[must_use]
    pub fn id(&self) -> &WordId {
        &self.id
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn transliteration(&self) -> &str {
        &self.transliteration
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn part_of_speech(&self) -> &str {
        &self.part_of_speech
    }

    /// Occurrences in the Greek New Testament.
    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    #[must_use]
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    /// The first comma-separated sense of the definition, trimmed.
    #[must_use]
    pub fn primary_sense(&self) -> &str {
        self.senses().next().unwrap_or(self.definition.as_str())
    }

    /// All senses of the definition, trimmed, in order.
    pub fn senses(&self) -> impl Iterator<Item = &str> {
        self.definition.split(',').map(str::trim)
    }

    /// Case-insensitive substring match over word, definition, and transliteration.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.word, &self.definition, &self.transliteration]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
