use std::env;

use logos_core::model::QuizMode;

use crate::pronunciation::PronunciationConfig;
use crate::sessions::DEFAULT_SESSION_SIZE;

pub const DEFAULT_DB_URL: &str = "sqlite://logos.sqlite3";

/// Runtime configuration assembled from the environment.
///
/// | variable | default |
/// |----------|---------|
/// | `LOGOS_DB_URL` | `sqlite://logos.sqlite3` |
/// | `LOGOS_SESSION_SIZE` | `10` |
/// | `LOGOS_QUIZ_MODE` | `greek-to-english` |
///
/// Pronunciation settings are read by [`PronunciationConfig::from_lookup`].
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_url: String,
    pub session_size: usize,
    pub quiz_mode: QuizMode,
    pub pronunciation: Option<PronunciationConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_url: DEFAULT_DB_URL.into(),
            session_size: DEFAULT_SESSION_SIZE,
            quiz_mode: QuizMode::default(),
            pronunciation: None,
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// Invalid values fall back to their defaults with a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_url = lookup("LOGOS_DB_URL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.into());

        let session_size = match lookup("LOGOS_SESSION_SIZE") {
            None => DEFAULT_SESSION_SIZE,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!("ignoring invalid LOGOS_SESSION_SIZE={raw}");
                    DEFAULT_SESSION_SIZE
                }
            },
        };

        let quiz_mode = match lookup("LOGOS_QUIZ_MODE") {
            None => QuizMode::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!("{err}; using {}", QuizMode::default());
                QuizMode::default()
            }),
        };

        Self {
            db_url,
            session_size,
            quiz_mode,
            pronunciation: PronunciationConfig::from_lookup(&lookup),
        }
    }
}
