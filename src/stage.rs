use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};

use crate::config::{FIRST_OPTION_KEY, SECOND_OPTION_KEY};
use crate::error::{ExperimentError, Result};
use crate::runtime::{ExperimentClock, StageEvent, StageEventSource};
use crate::script::{Screen, Step, StepKind};
use crate::ui::StageView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecallChoice {
    First,
    Second,
}

impl RecallChoice {
    fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char(c) if c == FIRST_OPTION_KEY => Some(RecallChoice::First),
            KeyCode::Char(c) if c == SECOND_OPTION_KEY => Some(RecallChoice::Second),
            _ => None,
        }
    }

    /// Key identity as logged in the row file
    pub fn key(self) -> char {
        match self {
            RecallChoice::First => FIRST_OPTION_KEY,
            RecallChoice::Second => SECOND_OPTION_KEY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    pub choice: RecallChoice,
    /// Experiment clock time of the keypress, in seconds
    pub time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Held,
    /// Clock time sampled right after the sync flash was flipped
    Flashed(f64),
    Responded(Response),
}

/// Owns the display, the input source and the session clock, and executes
/// script steps strictly in order.
pub struct Stage<B: Backend, E: StageEventSource> {
    terminal: Terminal<B>,
    events: E,
    clock: ExperimentClock,
    canvas: (u16, u16),
}

impl<B: Backend, E: StageEventSource> Stage<B, E> {
    pub fn new(
        terminal: Terminal<B>,
        events: E,
        clock: ExperimentClock,
        canvas: (u16, u16),
    ) -> Self {
        Self {
            terminal,
            events,
            clock,
            canvas,
        }
    }

    pub fn clock(&self) -> &ExperimentClock {
        &self.clock
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn execute(&mut self, step: &Step) -> Result<StepOutcome> {
        self.show(&step.screen)?;

        match step.kind {
            StepKind::Timed(hold) => {
                self.hold(&step.screen, hold)?;
                Ok(StepOutcome::Held)
            }
            StepKind::Flash => Ok(StepOutcome::Flashed(self.clock.elapsed_secs())),
            StepKind::AwaitResponse => self
                .await_response(&step.screen)
                .map(StepOutcome::Responded),
        }
    }

    fn show(&mut self, screen: &Screen) -> Result<()> {
        let canvas = self.canvas;
        self.terminal
            .draw(|f| f.render_widget(StageView { screen, canvas }, f.area()))?;
        Ok(())
    }

    /// Keep `screen` up for `hold`. Keys pressed meanwhile are dropped.
    fn hold(&mut self, screen: &Screen, hold: Duration) -> Result<()> {
        let deadline = Instant::now() + hold;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            match self.events.recv_timeout(remaining) {
                Ok(event) => {
                    self.handle_common(screen, &event)?;
                }
                Err(RecvTimeoutError::Timeout) => {}
                // Nothing more to read; the hold itself still runs its course
                Err(RecvTimeoutError::Disconnected) => {
                    std::thread::sleep(remaining);
                    return Ok(());
                }
            }
        }
    }

    /// Block until one of the two response keys arrives. There is no timeout.
    fn await_response(&mut self, screen: &Screen) -> Result<Response> {
        loop {
            match self.events.recv() {
                Ok(event) => {
                    self.handle_common(screen, &event)?;
                    if let StageEvent::Key(key) = event {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if let Some(choice) = RecallChoice::from_key(&key) {
                            return Ok(Response {
                                choice,
                                time: self.clock.elapsed_secs(),
                            });
                        }
                    }
                }
                Err(_) => return Err(ExperimentError::InputClosed),
            }
        }
    }

    /// Handling shared by every wait: ctrl+c aborts, resize redraws
    fn handle_common(&mut self, screen: &Screen, event: &StageEvent) -> Result<()> {
        match event {
            StageEvent::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c') =>
            {
                Err(ExperimentError::Interrupted)
            }
            StageEvent::Resize => self.show(screen),
            StageEvent::Key(_) => Ok(()),
        }
    }
}
