mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{DEFAULT_SESSION_SIZE, SessionBuilder, SessionPlan};
pub use progress::SessionProgress;
pub use service::{AnswerOutcome, QuizSession, SessionAnswer, SessionReport, SessionStatus};
pub use workflow::SessionLoopService;
