//! Error types for loading stimuli and running a session.
//!
//! Everything up to the first trial is a startup failure; anything raised
//! once trials are running aborts the remaining session.

use std::path::PathBuf;
use thiserror::Error;

use crate::condition::WordType;

#[derive(Debug, Error)]
pub enum ExperimentError {
    /// The stimulus table could not be opened.
    #[error("cannot read stimulus file {path}: {source}")]
    StimulusFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the stimulus table header.
    #[error("stimulus table is missing column '{0}'")]
    MissingColumn(String),

    #[error("no stimulus words for {0}")]
    EmptyCategory(WordType),

    /// The recall screen reads the first two option rows of a category.
    #[error("{word_type} needs at least 2 recall option rows, found {found}")]
    TooFewRecallOptions { word_type: WordType, found: usize },

    /// Rows 0 and 1 are the two recall options and must not be blank.
    #[error("{word_type} recall option row {row} is blank")]
    BlankRecallOption { word_type: WordType, row: usize },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ctrl+C while the terminal is in raw mode.
    #[error("session interrupted by operator")]
    Interrupted,

    #[error("terminal input closed")]
    InputClosed,
}

impl ExperimentError {
    /// Returns `true` if the error happened before any trial could run.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            ExperimentError::StimulusFile { .. }
                | ExperimentError::MissingColumn(_)
                | ExperimentError::EmptyCategory(_)
                | ExperimentError::TooFewRecallOptions { .. }
                | ExperimentError::BlankRecallOption { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ExperimentError>;
