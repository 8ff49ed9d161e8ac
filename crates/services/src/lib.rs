#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod progress_service;
pub mod pronunciation;
pub mod sessions;

pub use logos_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use config::AppConfig;
pub use error::{AppServicesError, ProgressServiceError, PronunciationError, SessionError};
pub use progress_service::{LexiconEntry, ProgressService, ResetRequest};
pub use pronunciation::{
    GeminiPronouncer, Pronouncer, PronunciationConfig, PronunciationService, SpeakOutcome,
    SpeechAudio,
};
pub use sessions::{
    AnswerOutcome, QuizSession, SessionAnswer, SessionLoopService, SessionProgress, SessionReport,
    SessionStatus,
};
