use crate::model::progress::ProgressMap;

/// Aggregate statistics over the learner's progress.
///
/// Always recomputed from the current [`ProgressMap`]; nothing here is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MasterySummary {
    pub words_seen: usize,
    pub catalog_size: usize,
    pub total_correct: u64,
    pub total_incorrect: u64,
    /// Rounded percentage of correct answers; 0 when nothing was answered.
    pub accuracy: u32,
    pub mastered_count: usize,
}

impl MasterySummary {
    #[must_use]
    pub fn from_progress(progress: &ProgressMap, catalog_size: usize) -> Self {
        let (total_correct, total_incorrect) =
            progress.records().fold((0_u64, 0_u64), |(c, i), record| {
                (
                    c + u64::from(record.correct_count()),
                    i + u64::from(record.incorrect_count()),
                )
            });

        Self {
            words_seen: progress.len(),
            catalog_size,
            total_correct,
            total_incorrect,
            accuracy: accuracy_percent(total_correct, total_incorrect),
            mastered_count: progress.records().filter(|r| r.is_mastered()).count(),
        }
    }

    #[must_use]
    pub fn total_answers(&self) -> u64 {
        self.total_correct + self.total_incorrect
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn accuracy_percent(correct: u64, incorrect: u64) -> u32 {
    let total = correct + incorrect;
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProgressRecord, WordId};
    use crate::time::fixed_now;

    fn record(id: &str, correct: u32, incorrect: u32, level: f64) -> ProgressRecord {
        ProgressRecord::from_persisted(WordId::new(id), correct, incorrect, fixed_now(), level)
            .unwrap()
    }

    #[test]
    fn empty_progress_has_zero_accuracy() {
        let summary = MasterySummary::from_progress(&ProgressMap::new(), 25);
        assert_eq!(summary.accuracy, 0);
        assert_eq!(summary.words_seen, 0);
        assert_eq!(summary.mastered_count, 0);
        assert_eq!(summary.catalog_size, 25);
    }

    #[test]
    fn aggregates_counts_and_rounds_accuracy() {
        let progress = ProgressMap::from_records([
            record("1", 2, 1, 3.0),
            record("2", 0, 0, 0.0),
            record("3", 0, 0, 2.5),
        ])
        .unwrap();

        let summary = MasterySummary::from_progress(&progress, 25);
        assert_eq!(summary.words_seen, 3);
        assert_eq!(summary.total_correct, 2);
        assert_eq!(summary.total_incorrect, 1);
        assert_eq!(summary.accuracy, 67);
        assert_eq!(summary.mastered_count, 1);
        assert_eq!(summary.total_answers(), 3);
    }

    #[test]
    fn half_percent_rounds_up() {
        // 1 of 8 correct is 12.5%.
        let progress = ProgressMap::from_records([record("1", 1, 7, 0.0)]).unwrap();
        assert_eq!(MasterySummary::from_progress(&progress, 1).accuracy, 13);
    }
}
