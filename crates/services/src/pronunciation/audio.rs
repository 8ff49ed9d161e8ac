use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::time::Duration;

use crate::error::PronunciationError;

/// Sample rate of synthesized speech.
pub const SAMPLE_RATE_HZ: u32 = 24_000;

/// Mono signed 16-bit little-endian PCM returned by the speech service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pcm: Vec<u8>,
}

impl SpeechAudio {
    /// Wrap raw PCM bytes.
    ///
    /// # Errors
    ///
    /// Returns `PronunciationError::EmptyResponse` for an empty buffer and
    /// `PronunciationError::InvalidAudio` for an odd byte count.
    pub fn from_pcm(pcm: Vec<u8>) -> Result<Self, PronunciationError> {
        if pcm.is_empty() {
            return Err(PronunciationError::EmptyResponse);
        }
        if pcm.len() % 2 != 0 {
            return Err(PronunciationError::InvalidAudio(format!(
                "odd PCM length {}",
                pcm.len()
            )));
        }
        Ok(Self { pcm })
    }

    /// Decode the base64 inline payload of a speech response.
    ///
    /// # Errors
    ///
    /// Returns `PronunciationError::InvalidAudio` if the payload is not valid base64,
    /// plus the errors of [`SpeechAudio::from_pcm`].
    pub fn from_base64(encoded: &str) -> Result<Self, PronunciationError> {
        let pcm = STANDARD
            .decode(encoded.trim())
            .map_err(|err| PronunciationError::InvalidAudio(err.to_string()))?;
        Self::from_pcm(pcm)
    }

    #[must_use]
    pub fn pcm(&self) -> &[u8] {
        &self.pcm
    }

    #[must_use]
    pub fn into_pcm(self) -> Vec<u8> {
        self.pcm
    }

    /// Samples decoded from little-endian byte pairs.
    #[must_use]
    pub fn samples(&self) -> Vec<i16> {
        self.pcm
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        let frames = (self.pcm.len() / 2) as u64;
        Duration::from_micros(frames * 1_000_000 / u64::from(SAMPLE_RATE_HZ))
    }
}
