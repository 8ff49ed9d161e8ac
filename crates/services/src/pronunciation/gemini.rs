use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{Pronouncer, SpeechAudio};
use crate::error::PronunciationError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";
const DEFAULT_VOICE: &str = "Kore";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PronunciationConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub voice: String,
}

impl PronunciationConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read `LOGOS_TTS_*` settings through `lookup`.
    ///
    /// Returns `None` when no API key is set (`LOGOS_TTS_API_KEY`, falling back to
    /// `API_KEY`) or when the base URL does not parse.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup("LOGOS_TTS_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())?;

        let base_url = non_blank(lookup("LOGOS_TTS_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        if Url::parse(&base_url).is_err() {
            log::warn!("invalid LOGOS_TTS_BASE_URL {base_url}; pronunciation disabled");
            return None;
        }

        Some(Self {
            base_url,
            api_key,
            model: non_blank(lookup("LOGOS_TTS_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.into()),
            voice: non_blank(lookup("LOGOS_TTS_VOICE")).unwrap_or_else(|| DEFAULT_VOICE.into()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_owned())
        .filter(|val| !val.is_empty())
}

/// Speech synthesis through the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiPronouncer {
    client: Client,
    config: Option<PronunciationConfig>,
}

impl GeminiPronouncer {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(PronunciationConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<PronunciationConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl Pronouncer for GeminiPronouncer {
    async fn synthesize(&self, word: &str) -> Result<SpeechAudio, PronunciationError> {
        let config = self
            .config
            .as_ref()
            .ok_or(PronunciationError::NotConfigured)?;

        let url = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        let payload = SpeechRequest::new(word, &config.voice);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PronunciationError::HttpStatus(response.status()));
        }

        let body: SpeechResponse = response.json().await?;
        let data = body
            .first_inline_audio()
            .ok_or(PronunciationError::EmptyResponse)?;
        SpeechAudio::from_base64(&data)
    }
}

fn pronunciation_prompt(word: &str) -> String {
    format!(
        "Pronounce the following Koine Greek word clearly: {word}. \
         Use a standard scholarly pronunciation (similar to Erasmian but natural)."
    )
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

impl SpeechRequest {
    fn new(word: &str, voice: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![TextPart {
                    text: pronunciation_prompt(word),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.to_owned(),
                        },
                    },
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct SpeechResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl SpeechResponse {
    fn first_inline_audio(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .inline_data
            .map(|inline| inline.data)
            .filter(|data| !data.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(pairs: &[(&'static str, &'static str)]) -> Option<PronunciationConfig> {
        let pairs = pairs.to_vec();
        PronunciationConfig::from_lookup(move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        })
    }

    #[test]
    fn missing_or_blank_key_disables_pronunciation() {
        assert!(config_with(&[]).is_none());
        assert!(config_with(&[("LOGOS_TTS_API_KEY", "   ")]).is_none());
    }

    #[test]
    fn falls_back_to_generic_api_key_and_defaults() {
        let config = config_with(&[("API_KEY", "k")]).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.voice, DEFAULT_VOICE);
    }

    #[test]
    fn invalid_base_url_disables_pronunciation() {
        assert!(
            config_with(&[("LOGOS_TTS_API_KEY", "k"), ("LOGOS_TTS_BASE_URL", "not a url")])
                .is_none()
        );
    }

    #[test]
    fn request_asks_for_audio_with_voice() {
        let json = serde_json::to_value(SpeechRequest::new("λόγος", "Kore")).unwrap();
        assert_eq!(json["generationConfig"]["responseModalities"][0], "AUDIO");
        assert_eq!(
            json["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Kore"
        );
        let text = json["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("λόγος"));
    }

    #[test]
    fn extracts_first_inline_audio_part() {
        let body: SpeechResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"audio/L16","data":"AAE="}}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.first_inline_audio().as_deref(), Some("AAE="));
    }

    #[test]
    fn empty_response_has_no_audio() {
        let body: SpeechResponse = serde_json::from_str("{}").unwrap();
        assert!(body.first_inline_audio().is_none());

        let body: SpeechResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"hi"}]}}]}"#)
                .unwrap();
        assert!(body.first_inline_audio().is_none());
    }

    #[tokio::test]
    async fn unconfigured_pronouncer_reports_not_configured() {
        let pronouncer = GeminiPronouncer::new(None);
        assert!(!pronouncer.enabled());
        assert!(matches!(
            pronouncer.synthesize("θεός").await,
            Err(PronunciationError::NotConfigured)
        ));
    }
}
