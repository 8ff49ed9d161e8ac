mod ids;
mod progress;
mod quiz;
mod summary;
mod word;

pub use ids::{ParseIdError, WordId};
pub use progress::{
    CORRECT_STEP, INCORRECT_STEP, MASTERED_LEVEL, MAX_LEVEL, MIN_LEVEL, ProgressError, ProgressMap,
    ProgressRecord,
};
pub use quiz::{ParseQuizModeError, QuizMode, normalize_answer};
pub use summary::MasterySummary;
pub use word::{WordEntry, WordError};
