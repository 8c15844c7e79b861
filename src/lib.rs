// Library surface for the binary and for headless integration tests.
pub mod condition;
pub mod config;
pub mod error;
pub mod experiment;
pub mod logger;
pub mod plan;
pub mod runtime;
pub mod script;
pub mod selector;
pub mod stage;
pub mod stimuli;
pub mod ui;

pub use error::{ExperimentError, Result};
