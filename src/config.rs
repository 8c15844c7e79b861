use std::path::PathBuf;
use std::time::Duration;

/// Key that selects the first recall option
pub const FIRST_OPTION_KEY: char = '1';
/// Key that selects the second recall option
pub const SECOND_OPTION_KEY: char = '0';

/// Compiled-in session parameters. There are no flags or environment
/// overrides; tests build variants with struct update syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    pub num_reps: usize,
    /// Uses allowed per word before it is withheld until the category resets
    pub max_uses: u32,
    pub training_banner: Duration,
    pub start_banner: Duration,
    pub cue: Duration,
    pub pre_word_fixation: Duration,
    pub word: Duration,
    pub post_word_fixation: Duration,
    /// Logical canvas size in pixels (width, height)
    pub canvas: (u16, u16),
    pub stimuli_path: PathBuf,
    pub rows_path: PathBuf,
    pub records_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_reps: 3,
            max_uses: 3,
            training_banner: Duration::from_millis(2000),
            start_banner: Duration::from_millis(1000),
            cue: Duration::from_millis(1300),
            pre_word_fixation: Duration::from_millis(2200),
            word: Duration::from_millis(1000),
            post_word_fixation: Duration::from_millis(3000),
            canvas: (800, 600),
            stimuli_path: PathBuf::from("stimuli_words.csv"),
            rows_path: PathBuf::from("experiment_data.csv"),
            records_path: PathBuf::from("experiment_data.json"),
            log_path: PathBuf::from("experiment.log"),
        }
    }
}

impl ExperimentConfig {
    /// Same session with every timed hold set to zero
    pub fn without_holds(self) -> Self {
        Self {
            training_banner: Duration::ZERO,
            start_banner: Duration::ZERO,
            cue: Duration::ZERO,
            pre_word_fixation: Duration::ZERO,
            word: Duration::ZERO,
            post_word_fixation: Duration::ZERO,
            ..self
        }
    }

    /// Total fixed hold time of one trial, excluding the recall wait
    pub fn trial_hold(&self) -> Duration {
        self.cue + self.pre_word_fixation + self.word + self.post_word_fixation
    }
}
