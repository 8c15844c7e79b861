use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

use crate::condition::WordType;
use crate::stimuli::StimulusSet;

/// Word picked for a trial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub word: String,
    /// The category had run out of words and its counts were zeroed first
    pub was_reset: bool,
}

/// Per-category word usage counts, threaded through every selection.
#[derive(Debug, Clone)]
pub struct WordUsage {
    word_lists: BTreeMap<WordType, Vec<String>>,
    counts: HashMap<WordType, HashMap<String, u32>>,
    max_uses: u32,
}

impl WordUsage {
    pub fn new(stimuli: &StimulusSet, max_uses: u32) -> Self {
        let word_lists = stimuli.word_lists.clone();
        let counts = word_lists
            .iter()
            .map(|(word_type, words)| (*word_type, zeroed(words)))
            .collect();

        Self {
            word_lists,
            counts,
            max_uses,
        }
    }

    pub fn count(&self, word_type: WordType, word: &str) -> u32 {
        self.counts
            .get(&word_type)
            .and_then(|c| c.get(word))
            .copied()
            .unwrap_or(0)
    }

    /// Pick a word from `word_type` whose count is below the limit, zeroing
    /// the whole category first if every word has reached it.
    ///
    /// Returns `None` only for a category with no words.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        word_type: WordType,
        rng: &mut R,
    ) -> Option<Selection> {
        let max_uses = self.max_uses;
        let words = self.word_lists.get(&word_type)?;
        let counts = self.counts.entry(word_type).or_default();

        let mut available: Vec<&String> = words
            .iter()
            .filter(|w| counts.get(*w).copied().unwrap_or(0) < max_uses)
            .collect();

        let was_reset = available.is_empty();
        if was_reset {
            tracing::warn!(
                "All words from {} have been used {} times. Resetting counts.",
                word_type,
                max_uses
            );
            *counts = zeroed(words);
            available = words.iter().collect();
        }

        let word = (*available.choose(rng)?).clone();
        *counts.entry(word.clone()).or_insert(0) += 1;

        Some(Selection { word, was_reset })
    }
}

fn zeroed(words: &[String]) -> HashMap<String, u32> {
    words.iter().map(|w| (w.clone(), 0)).collect()
}
