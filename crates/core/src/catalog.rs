use std::collections::HashSet;
use std::sync::OnceLock;

use thiserror::Error;

use crate::model::{WordEntry, WordError, WordId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one word")]
    Empty,

    #[error("duplicate word id in catalog: {0}")]
    DuplicateId(WordId),

    #[error(transparent)]
    Word(#[from] WordError),
}

//
// ─── BUILT-IN WORD LIST ────────────────────────────────────────────────────────
//

/// Index of the featured "word of the day" in the built-in list (πνεῦμα).
const FEATURED_INDEX: usize = 10;

/// Koine Greek core vocabulary: id, word, transliteration, definition, part of speech,
/// occurrences in the Greek New Testament.
const GREEK_VOCABULARY: &[(&str, &str, &str, &str, &str, u32)] = &[
    ("1", "θεός", "theos", "God, a god", "noun", 1317),
    ("2", "καί", "kai", "and, even, also", "conjunction", 9018),
    ("3", "λέγω", "legō", "I say, speak", "verb", 2354),
    ("4", "κύριος", "kyrios", "Lord, master, sir", "noun", 717),
    ("5", "ἄνθρωπος", "anthrōpos", "man, mankind, person", "noun", 550),
    ("6", "χριστός", "christos", "Christ, Messiah, Anointed One", "noun", 529),
    ("7", "ἀγάπη", "agapē", "love", "noun", 116),
    ("8", "πίστις", "pistis", "faith, belief, trust", "noun", 243),
    ("9", "κόσμος", "kosmos", "world, universe", "noun", 185),
    ("10", "λόγος", "logos", "word, message, reason", "noun", 331),
    ("11", "πνεῦμα", "pneuma", "spirit, wind, breath", "noun", 379),
    ("12", "υἱός", "huios", "son, descendant", "noun", 377),
    ("13", "ἀδελφός", "adelphos", "brother", "noun", 343),
    ("14", "οὐρανός", "ouranos", "heaven, sky", "noun", 273),
    ("15", "μαθητής", "mathētēs", "disciple, student", "noun", 261),
    ("16", "ἐκκλησία", "ekklēsia", "church, assembly", "noun", 114),
    ("17", "ζωή", "zōē", "life", "noun", 135),
    ("18", "φωνή", "phōnē", "voice, sound", "noun", 139),
    ("19", "ὁδός", "hodos", "way, path, road", "noun", 101),
    ("20", "καρδία", "kardia", "heart", "noun", 156),
    ("21", "ἀλήθεια", "alētheia", "truth", "noun", 109),
    ("22", "χάρις", "charis", "grace, favor", "noun", 155),
    ("23", "βασιλεία", "basileia", "kingdom", "noun", 162),
    ("24", "ἔργον", "ergon", "work, deed", "noun", 169),
    ("25", "δόξα", "doxa", "glory, splendor", "noun", 166),
];

static BUILTIN: OnceLock<VocabularyCatalog> = OnceLock::new();

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable, ordered list of quiz words.
///
/// Built once and never mutated; sessions only ever read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyCatalog {
    entries: Vec<WordEntry>,
}

impl VocabularyCatalog {
    /// Build a catalog from caller-provided entries.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list and `CatalogError::DuplicateId`
    /// when two entries share an id.
    pub fn from_entries(entries: Vec<WordEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(CatalogError::DuplicateId(entry.id().clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in Greek word list, initialised on first access.
    #[must_use]
    pub fn builtin() -> &'static VocabularyCatalog {
        BUILTIN.get_or_init(|| {
            let entries = GREEK_VOCABULARY
                .iter()
                .filter_map(|&(id, word, translit, definition, pos, freq)| {
                    WordEntry::new(id, word, translit, definition, pos, freq).ok()
                })
                .collect();
            Self { entries }
        })
    }

    /// All entries in catalog order.
    #[must_use]
    pub fn all(&self) -> &[WordEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &WordId) -> Option<&WordEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose word, definition, or transliteration contains `term`
    /// (case-insensitive), in catalog order. A blank term matches everything.
    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a WordEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.matches(term))
    }

    /// The featured entry shown on the home screen.
    #[must_use]
    pub fn word_of_the_day(&self) -> Option<&WordEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(FEATURED_INDEX % self.entries.len())
    }
}
