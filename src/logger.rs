use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::condition::{TaskCondition, TriggerCode, WordType};
use crate::error::Result;
use crate::stage::Response;

pub const FIELDNAMES: [&str; 9] = [
    "Trial",
    "WordType",
    "TaskCondition",
    "StimulusWord",
    "TriggerCode",
    "TimeFromStart",
    "BitmapStimulusTime",
    "RecallOption",
    "ParticipantResponseTime",
];

/// What is known about a trial at the sync flash
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrialRecord {
    pub trial: usize,
    pub word_type: WordType,
    pub task_condition: TaskCondition,
    pub stimulus_word: String,
    pub trigger_code: TriggerCode,
    pub time_from_start: f64,
    pub bitmap_stimulus_time: f64,
}

/// One physical row of the row file; a trial produces two of them
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Row<'a> {
    trial: Option<usize>,
    word_type: Option<WordType>,
    task_condition: Option<TaskCondition>,
    stimulus_word: Option<&'a str>,
    trigger_code: Option<TriggerCode>,
    time_from_start: Option<f64>,
    bitmap_stimulus_time: Option<f64>,
    recall_option: Option<char>,
    participant_response_time: Option<f64>,
}

impl<'a> From<&'a TrialRecord> for Row<'a> {
    fn from(r: &'a TrialRecord) -> Self {
        Self {
            trial: Some(r.trial),
            word_type: Some(r.word_type),
            task_condition: Some(r.task_condition),
            stimulus_word: Some(&r.stimulus_word),
            trigger_code: Some(r.trigger_code),
            time_from_start: Some(r.time_from_start),
            bitmap_stimulus_time: Some(r.bitmap_stimulus_time),
            ..Default::default()
        }
    }
}

/// Appends trial data to the row file and the JSON lines file.
///
/// Every write is flushed on its own; nothing ties the two files or the two
/// rows of a trial together.
pub struct DataLogger {
    rows: csv::Writer<File>,
    records: BufWriter<File>,
}

impl DataLogger {
    /// Truncates the row file and writes its header. The JSON lines file is
    /// appended to, never truncated.
    pub fn create<P: AsRef<Path>, Q: AsRef<Path>>(
        rows_path: P,
        records_path: Q,
    ) -> Result<Self> {
        let mut rows = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(File::create(rows_path)?);
        rows.write_record(FIELDNAMES)?;
        rows.flush()?;

        let records = OpenOptions::new()
            .create(true)
            .append(true)
            .open(records_path)?;

        Ok(Self {
            rows,
            records: BufWriter::new(records),
        })
    }

    pub fn log_trial(&mut self, record: &TrialRecord) -> Result<()> {
        self.rows.serialize(Row::from(record))?;
        self.rows.flush()?;

        serde_json::to_writer(&mut self.records, record)?;
        self.records.write_all(b"\n")?;
        self.records.flush()?;
        Ok(())
    }

    pub fn log_recall(&mut self, response: &Response) -> Result<()> {
        self.rows.serialize(Row {
            recall_option: Some(response.choice.key()),
            participant_response_time: Some(response.time),
            ..Default::default()
        })?;
        self.rows.flush()?;
        Ok(())
    }
}
