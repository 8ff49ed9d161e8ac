//! Spoken pronunciation of catalog words.
//!
//! The quiz never depends on this module: speech is requested on demand, and
//! every failure is logged and dropped at the [`PronunciationService`] boundary.

mod audio;
mod gemini;
mod service;

use async_trait::async_trait;

use crate::error::PronunciationError;

pub use audio::{SAMPLE_RATE_HZ, SpeechAudio};
pub use gemini::{GeminiPronouncer, PronunciationConfig};
pub use service::{PronunciationService, SpeakOutcome};

/// Capability that renders a word as audio.
#[async_trait]
pub trait Pronouncer: Send + Sync {
    /// Produce spoken audio for `word`.
    ///
    /// # Errors
    ///
    /// Returns `PronunciationError` when the capability is unconfigured, the request
    /// fails, or no audio comes back.
    async fn synthesize(&self, word: &str) -> Result<SpeechAudio, PronunciationError>;
}
