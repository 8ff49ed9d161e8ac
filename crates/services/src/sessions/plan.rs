use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;

use logos_core::VocabularyCatalog;
use logos_core::model::WordEntry;

/// Number of words drawn for a session unless configured otherwise.
pub const DEFAULT_SESSION_SIZE: usize = 10;

/// Words selected for one session, in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub words: Vec<WordEntry>,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Draws a session's words uniformly at random, without replacement.
///
/// Selection ignores mastery; every catalog word is equally likely.
pub struct SessionBuilder<'a> {
    catalog: &'a VocabularyCatalog,
    size: usize,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(catalog: &'a VocabularyCatalog) -> Self {
        Self {
            catalog,
            size: DEFAULT_SESSION_SIZE,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Build a plan using the thread-local generator.
    #[must_use]
    pub fn build(self) -> SessionPlan {
        self.build_with_rng(&mut rng())
    }

    /// Build a plan from the given random source.
    ///
    /// A catalog smaller than the requested size yields every word exactly once.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> SessionPlan {
        let mut words = self.catalog.all().to_vec();
        words.shuffle(rng);
        words.truncate(self.size);
        SessionPlan { words }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn small_catalog(n: usize) -> VocabularyCatalog {
        let entries = (0..n)
            .map(|i| {
                WordEntry::new(i.to_string(), format!("w{i}"), "", format!("d{i}"), "noun", 1)
                    .unwrap()
            })
            .collect();
        VocabularyCatalog::from_entries(entries).unwrap()
    }

    fn ids(plan: &SessionPlan) -> Vec<String> {
        plan.words.iter().map(|w| w.id().to_string()).collect()
    }

    #[test]
    fn draws_ten_distinct_words_from_large_catalog() {
        let catalog = VocabularyCatalog::builtin();
        for seed in 0..20 {
            let plan = SessionBuilder::new(catalog).build_with_rng(&mut StdRng::seed_from_u64(seed));
            assert_eq!(plan.total(), 10);
            let unique: HashSet<_> = ids(&plan).into_iter().collect();
            assert_eq!(unique.len(), 10);
        }
    }

    #[test]
    fn small_catalog_yields_every_word_once() {
        let catalog = small_catalog(4);
        let plan = SessionBuilder::new(&catalog).build_with_rng(&mut StdRng::seed_from_u64(7));
        let mut got = ids(&plan);
        got.sort();
        assert_eq!(got, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn same_seed_gives_same_selection() {
        let catalog = VocabularyCatalog::builtin();
        let a = SessionBuilder::new(catalog).build_with_rng(&mut StdRng::seed_from_u64(42));
        let b = SessionBuilder::new(catalog).build_with_rng(&mut StdRng::seed_from_u64(42));
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn respects_custom_size() {
        let catalog = VocabularyCatalog::builtin();
        let plan = SessionBuilder::new(catalog)
            .with_size(3)
            .build_with_rng(&mut StdRng::seed_from_u64(1));
        assert_eq!(plan.total(), 3);
        assert!(!plan.is_empty());
    }

    #[test]
    fn default_rng_build_has_default_size() {
        let plan = SessionBuilder::new(VocabularyCatalog::builtin()).build();
        assert_eq!(plan.total(), DEFAULT_SESSION_SIZE);
    }
}
