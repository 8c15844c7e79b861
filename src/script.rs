//! The fixed screen sequence of a session, as data.
//!
//! A trial is a list of [`Step`]s; the stage executes them one by one and
//! nothing else decides what appears on screen or for how long.

use std::time::Duration;

use crate::config::ExperimentConfig;
use crate::plan::Trial;
use crate::stimuli::OptionPair;

pub const FIXATION: &str = "+";
pub const RECALL_QUESTION: &str = "Quel était le dernier mot que vous avez dit?";
pub const TRAINING_BANNER: &str = "C'EST LA PHASE DE FORMATION";
pub const START_BANNER: &str = "MAINTENANT, L'EXPERIENCE COMMENCE";

/// What is drawn on the canvas for one step
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Banner(String),
    Cue(String),
    Fixation,
    Word(String),
    /// Light-gray square picked up by the photodiode
    SyncFlash,
    Recall { first: OptionPair, second: OptionPair },
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepKind {
    /// Hold the screen for a fixed duration
    Timed(Duration),
    /// Flip and immediately sample the experiment clock
    Flash,
    /// Hold until one of the response keys is pressed
    AwaitResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub screen: Screen,
    pub kind: StepKind,
}

impl Step {
    pub fn timed(screen: Screen, hold: Duration) -> Self {
        Self {
            screen,
            kind: StepKind::Timed(hold),
        }
    }
}

/// Banners shown once before the first trial
pub fn preamble(cfg: &ExperimentConfig) -> Vec<Step> {
    vec![
        Step::timed(Screen::Banner(TRAINING_BANNER.into()), cfg.training_banner),
        Step::timed(Screen::Banner(START_BANNER.into()), cfg.start_banner),
    ]
}

/// Steps for one trial. The recall options are the category's first two
/// option rows, whichever word was shown.
pub fn trial_steps(
    cfg: &ExperimentConfig,
    trial: &Trial,
    word: &str,
    options: &[OptionPair],
) -> Vec<Step> {
    let option = |idx: usize| options.get(idx).cloned().unwrap_or_default();

    vec![
        Step::timed(Screen::Cue(trial.condition.cue_phrase().into()), cfg.cue),
        Step::timed(Screen::Fixation, cfg.pre_word_fixation),
        Step::timed(Screen::Word(word.into()), cfg.word),
        Step::timed(Screen::Fixation, cfg.post_word_fixation),
        Step {
            screen: Screen::SyncFlash,
            kind: StepKind::Flash,
        },
        Step {
            screen: Screen::Recall {
                first: option(0),
                second: option(1),
            },
            kind: StepKind::AwaitResponse,
        },
        Step::timed(Screen::Blank, Duration::ZERO),
    ]
}
