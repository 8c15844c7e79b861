use itertools::iproduct;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::condition::{TaskCondition, WordType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trial {
    pub word_type: WordType,
    pub condition: TaskCondition,
}

/// Ordered trial list for one session
#[derive(Debug, Clone, PartialEq)]
pub struct TrialPlan {
    trials: Vec<Trial>,
}

impl TrialPlan {
    /// Block-shuffled replication of every (category, condition) pair,
    /// followed by a shuffle of the whole list.
    pub fn build<R: Rng + ?Sized>(num_reps: usize, rng: &mut R) -> Self {
        let mut combinations: Vec<Trial> = iproduct!(WordType::ALL, TaskCondition::ALL)
            .map(|(word_type, condition)| Trial {
                word_type,
                condition,
            })
            .collect();

        let mut trials = Vec::with_capacity(combinations.len() * num_reps);
        for _ in 0..num_reps {
            combinations.shuffle(rng);
            trials.extend_from_slice(&combinations);
        }

        trials.shuffle(rng);

        Self { trials }
    }

    pub fn seeded(num_reps: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::build(num_reps, &mut rng)
    }

    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Number of times `word_type` x `condition` occurs in the plan
    pub fn count(&self, word_type: WordType, condition: TaskCondition) -> usize {
        self.trials
            .iter()
            .filter(|t| t.word_type == word_type && t.condition == condition)
            .count()
    }
}
