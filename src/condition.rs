use serde::{Serialize, Serializer};
use std::fmt;

/// Stimulus word category, one column group of the stimulus table
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum_macros::Display,
)]
pub enum WordType {
    W1,
    W2,
    W3,
    W4,
}

impl WordType {
    pub const ALL: [WordType; 4] = [WordType::W1, WordType::W2, WordType::W3, WordType::W4];

    /// Category half of the trigger code
    pub fn numeric(self) -> u8 {
        match self {
            WordType::W1 => 4,
            WordType::W2 => 5,
            WordType::W3 => 6,
            WordType::W4 => 7,
        }
    }

    pub fn word_column(self) -> String {
        format!("Cue Words {self}")
    }

    /// Names of the two recall-option columns for this category
    pub fn option_columns(self) -> [String; 2] {
        [format!("Token1_{self}"), format!("Token2_{self}")]
    }
}

/// Task framing shown in the cue phase
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum_macros::Display,
)]
pub enum TaskCondition {
    Read,
    Null,
    Overt,
}

impl TaskCondition {
    pub const ALL: [TaskCondition; 3] =
        [TaskCondition::Read, TaskCondition::Null, TaskCondition::Overt];

    /// Condition half of the trigger code
    pub fn numeric(self) -> u8 {
        match self {
            TaskCondition::Read => 1,
            TaskCondition::Null => 2,
            TaskCondition::Overt => 3,
        }
    }

    pub fn cue_phrase(self) -> &'static str {
        match self {
            TaskCondition::Read => "C'est un",
            TaskCondition::Null | TaskCondition::Overt => "Ce sont des",
        }
    }
}

/// EEG marker sent alongside the sync flash: condition * 10 + category.
///
/// Logged as a decimal string ("14" .. "37").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerCode(u8);

impl TriggerCode {
    pub fn new(condition: TaskCondition, word_type: WordType) -> Self {
        Self(condition.numeric() * 10 + word_type.numeric())
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TriggerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TriggerCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
