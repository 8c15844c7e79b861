use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the stage
#[derive(Clone, Debug)]
pub enum StageEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize)
pub trait StageEventSource {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, Err(Timeout) if it expires,
    /// and Err(Disconnected) once no more events can arrive.
    fn recv_timeout(&self, timeout: Duration) -> Result<StageEvent, RecvTimeoutError>;

    /// Block until an event arrives. Err once no more events can arrive.
    fn recv(&self) -> Result<StageEvent, RecvError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<StageEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(StageEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(StageEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StageEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<StageEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<StageEvent, RecvError> {
        self.rx.recv()
    }
}

/// Test event source fed from a channel
pub struct TestEventSource {
    rx: Receiver<StageEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<StageEvent>) -> Self {
        Self { rx }
    }
}

impl StageEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<StageEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<StageEvent, RecvError> {
        self.rx.recv()
    }
}

/// Seconds elapsed since the session started; every logged time uses it
#[derive(Clone, Copy, Debug)]
pub struct ExperimentClock {
    started: Instant,
}

impl ExperimentClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}
