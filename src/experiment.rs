use rand::Rng;
use ratatui::backend::Backend;

use crate::condition::TriggerCode;
use crate::config::ExperimentConfig;
use crate::error::{ExperimentError, Result};
use crate::logger::{DataLogger, TrialRecord};
use crate::plan::TrialPlan;
use crate::runtime::StageEventSource;
use crate::script::{preamble, trial_steps};
use crate::selector::WordUsage;
use crate::stage::{Stage, StepOutcome};
use crate::stimuli::StimulusSet;

/// Everything one session needs, built once at startup
pub struct Experiment {
    pub config: ExperimentConfig,
    pub stimuli: StimulusSet,
    pub plan: TrialPlan,
    pub usage: WordUsage,
}

impl Experiment {
    pub fn new<R: Rng + ?Sized>(
        config: ExperimentConfig,
        stimuli: StimulusSet,
        rng: &mut R,
    ) -> Self {
        let plan = TrialPlan::build(config.num_reps, rng);
        let usage = WordUsage::new(&stimuli, config.max_uses);
        Self {
            config,
            stimuli,
            plan,
            usage,
        }
    }

    /// Run the preamble and every trial in plan order. The first error ends
    /// the session; rows logged before it stay on disk.
    ///
    /// Returns the number of completed trials.
    pub fn run<B, E, R>(
        &mut self,
        stage: &mut Stage<B, E>,
        logger: &mut DataLogger,
        rng: &mut R,
    ) -> Result<usize>
    where
        B: Backend,
        E: StageEventSource,
        R: Rng + ?Sized,
    {
        for step in preamble(&self.config) {
            stage.execute(&step)?;
        }

        let mut completed = 0;
        for (i, trial) in self.plan.trials().iter().enumerate() {
            let selection = self
                .usage
                .select(trial.word_type, rng)
                .ok_or(ExperimentError::EmptyCategory(trial.word_type))?;
            let trigger_code = TriggerCode::new(trial.condition, trial.word_type);

            let steps = trial_steps(
                &self.config,
                trial,
                &selection.word,
                self.stimuli.options(trial.word_type),
            );
            for step in &steps {
                match stage.execute(step)? {
                    StepOutcome::Held => {}
                    StepOutcome::Flashed(timestamp) => {
                        tracing::info!("Timestamp for Bitmap Stimulus: {timestamp}");
                        tracing::info!(
                            "Trigger Code: {trigger_code}, Time from start: {timestamp}"
                        );
                        logger.log_trial(&TrialRecord {
                            trial: i + 1,
                            word_type: trial.word_type,
                            task_condition: trial.condition,
                            stimulus_word: selection.word.clone(),
                            trigger_code,
                            time_from_start: timestamp,
                            bitmap_stimulus_time: timestamp,
                        })?;
                    }
                    StepOutcome::Responded(response) => {
                        tracing::info!(
                            "Participant response time: {} seconds, Option chosen: {}",
                            response.time,
                            response.choice.key()
                        );
                        logger.log_recall(&response)?;
                    }
                }
            }
            completed += 1;
        }

        Ok(completed)
    }
}
