use std::fmt;
use std::str::FromStr;

use crate::model::word::WordEntry;

/// Direction in which a word is quizzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuizMode {
    /// Show the Greek word, expect its primary English sense.
    #[default]
    GreekToEnglish,
    /// Show the primary English sense, expect the Greek word.
    EnglishToGreek,
}

impl QuizMode {
    /// Text shown to the learner before answering.
    #[must_use]
    pub fn prompt(self, entry: &WordEntry) -> &str {
        match self {
            QuizMode::GreekToEnglish => entry.word(),
            QuizMode::EnglishToGreek => entry.primary_sense(),
        }
    }

    /// Text shown once the answer has been judged.
    #[must_use]
    pub fn reveal(self, entry: &WordEntry) -> &str {
        match self {
            QuizMode::GreekToEnglish => entry.definition(),
            QuizMode::EnglishToGreek => entry.word(),
        }
    }

    /// Normalized answer a learner response is compared against.
    #[must_use]
    pub fn expected_answer(self, entry: &WordEntry) -> String {
        match self {
            QuizMode::GreekToEnglish => normalize_answer(entry.primary_sense()),
            QuizMode::EnglishToGreek => normalize_answer(entry.word()),
        }
    }

    /// Judge a raw learner answer. Blank answers are simply wrong.
    #[must_use]
    pub fn evaluate(self, entry: &WordEntry, raw_answer: &str) -> bool {
        let answer = normalize_answer(raw_answer);
        !answer.is_empty() && answer == self.expected_answer(entry)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizMode::GreekToEnglish => "greek-to-english",
            QuizMode::EnglishToGreek => "english-to-greek",
        }
    }
}

/// Trim surrounding whitespace and lowercase.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQuizModeError {
    raw: String,
}

impl fmt::Display for ParseQuizModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown quiz mode `{}` (expected greek-to-english or english-to-greek)",
            self.raw
        )
    }
}

impl std::error::Error for ParseQuizModeError {}

impl FromStr for QuizMode {
    type Err = ParseQuizModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greek-to-english" | "g2e" | "greek_to_english" => Ok(Self::GreekToEnglish),
            "english-to-greek" | "e2g" | "english_to_greek" => Ok(Self::EnglishToGreek),
            _ => Err(ParseQuizModeError { raw: s.to_owned() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theos() -> WordEntry {
        WordEntry::new("1", "θεός", "theos", "God, a god", "noun", 1317).unwrap()
    }

    #[test]
    fn greek_to_english_expects_primary_sense() {
        let entry = theos();
        assert_eq!(QuizMode::GreekToEnglish.prompt(&entry), "θεός");
        assert_eq!(QuizMode::GreekToEnglish.expected_answer(&entry), "god");
        assert_eq!(QuizMode::GreekToEnglish.reveal(&entry), "God, a god");
    }

    #[test]
    fn evaluation_trims_and_ignores_case() {
        let entry = WordEntry::new("x", "Theos", "theos", "theos", "noun", 1).unwrap();
        assert!(QuizMode::GreekToEnglish.evaluate(&entry, "  Theos "));
        assert!(QuizMode::EnglishToGreek.evaluate(&entry, "THEOS"));
    }

    #[test]
    fn secondary_senses_are_not_accepted() {
        assert!(!QuizMode::GreekToEnglish.evaluate(&theos(), "a god"));
    }

    #[test]
    fn english_to_greek_expects_the_word() {
        let entry = theos();
        assert_eq!(QuizMode::EnglishToGreek.prompt(&entry), "God");
        assert!(QuizMode::EnglishToGreek.evaluate(&entry, "θεός"));
        assert!(!QuizMode::EnglishToGreek.evaluate(&entry, "theos"));
    }

    #[test]
    fn empty_answer_is_incorrect() {
        assert!(!QuizMode::GreekToEnglish.evaluate(&theos(), ""));
        assert!(!QuizMode::GreekToEnglish.evaluate(&theos(), "   "));
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("g2e".parse::<QuizMode>().unwrap(), QuizMode::GreekToEnglish);
        assert_eq!(
            "English-To-Greek".parse::<QuizMode>().unwrap(),
            QuizMode::EnglishToGreek
        );
        assert!("sideways".parse::<QuizMode>().is_err());
        assert_eq!(QuizMode::EnglishToGreek.to_string(), "english-to-greek");
    }
}
