use std::sync::{Arc, Mutex, PoisonError};

use super::{GeminiPronouncer, Pronouncer, SpeechAudio};
use crate::pronunciation::PronunciationConfig;

/// Result of a pronunciation request as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakOutcome {
    Spoken(SpeechAudio),
    /// Another word is still being spoken; the request was ignored.
    Busy,
    /// The capability failed; the reason has been logged.
    Failed,
}

/// Fire-and-forget front for a [`Pronouncer`].
///
/// Holds a one-at-a-time latch keyed by the word in flight so the UI can disable
/// repeat requests. Errors never escape this type.
#[derive(Clone)]
pub struct PronunciationService {
    pronouncer: Arc<dyn Pronouncer>,
    in_flight: Arc<Mutex<Option<String>>>,
}

impl PronunciationService {
    #[must_use]
    pub fn new(pronouncer: Arc<dyn Pronouncer>) -> Self {
        Self {
            pronouncer,
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Service backed by the Gemini speech endpoint; disabled when `config` is `None`.
    #[must_use]
    pub fn gemini(config: Option<PronunciationConfig>) -> Self {
        Self::new(Arc::new(GeminiPronouncer::new(config)))
    }

    /// Word currently being spoken, if any.
    #[must_use]
    pub fn speaking(&self) -> Option<String> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_speaking(&self, word: &str) -> bool {
        self.speaking().as_deref() == Some(word)
    }

    /// Speak `word` unless another request is still outstanding.
    pub async fn speak(&self, word: &str) -> SpeakOutcome {
        let Some(_latch) = self.acquire(word) else {
            log::debug!("pronunciation busy; ignoring request for {word}");
            return SpeakOutcome::Busy;
        };

        match self.pronouncer.synthesize(word).await {
            Ok(audio) => SpeakOutcome::Spoken(audio),
            Err(err) => {
                log::warn!("pronunciation of {word} failed: {err}");
                SpeakOutcome::Failed
            }
        }
    }

    fn acquire(&self, word: &str) -> Option<Latch> {
        let mut slot = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return None;
        }
        *slot = Some(word.to_owned());
        Some(Latch {
            slot: Arc::clone(&self.in_flight),
        })
    }
}

/// Releases the in-flight slot when the request finishes or is dropped.
struct Latch {
    slot: Arc<Mutex<Option<String>>>,
}

impl Drop for Latch {
    fn drop(&mut self) {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PronunciationError;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    struct FixedPronouncer;

    #[async_trait]
    impl Pronouncer for FixedPronouncer {
        async fn synthesize(&self, _word: &str) -> Result<SpeechAudio, PronunciationError> {
            SpeechAudio::from_pcm(vec![0, 0, 1, 0])
        }
    }

    struct FailingPronouncer;

    #[async_trait]
    impl Pronouncer for FailingPronouncer {
        async fn synthesize(&self, _word: &str) -> Result<SpeechAudio, PronunciationError> {
            Err(PronunciationError::EmptyResponse)
        }
    }

    struct GatedPronouncer {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl Pronouncer for GatedPronouncer {
        async fn synthesize(&self, _word: &str) -> Result<SpeechAudio, PronunciationError> {
            self.started.notify_one();
            self.release.notified().await;
            SpeechAudio::from_pcm(vec![0, 0])
        }
    }

    #[tokio::test]
    async fn speaks_and_releases_latch() {
        let svc = PronunciationService::new(Arc::new(FixedPronouncer));
        let outcome = svc.speak("θεός").await;
        assert!(matches!(outcome, SpeakOutcome::Spoken(ref audio) if audio.samples() == vec![0, 1]));
        assert_eq!(svc.speaking(), None);
    }

    #[tokio::test]
    async fn failures_are_swallowed_and_release_latch() {
        let svc = PronunciationService::new(Arc::new(FailingPronouncer));
        assert_eq!(svc.speak("καί").await, SpeakOutcome::Failed);
        assert_eq!(svc.speaking(), None);
        assert_eq!(svc.speak("καί").await, SpeakOutcome::Failed);
    }

    #[tokio::test]
    async fn unconfigured_service_fails_quietly() {
        let svc = PronunciationService::gemini(None);
        assert_eq!(svc.speak("λόγος").await, SpeakOutcome::Failed);
    }

    #[tokio::test]
    async fn second_request_is_busy_while_first_is_in_flight() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let svc = Arc::new(PronunciationService::new(Arc::new(GatedPronouncer {
            started: Arc::clone(&started),
            release: Arc::clone(&release),
        })));

        let first = tokio::spawn({
            let svc = Arc::clone(&svc);
            async move { svc.speak("θεός").await }
        });

        started.notified().await;
        assert!(svc.is_speaking("θεός"));
        assert!(!svc.is_speaking("καί"));
        assert_eq!(svc.speak("καί").await, SpeakOutcome::Busy);

        release.notify_one();
        let outcome = first.await.unwrap();
        assert!(matches!(outcome, SpeakOutcome::Spoken(_)));
        assert_eq!(svc.speaking(), None);
    }
}
