//! Batch input parsing.
//!
//! A batch file holds one request per line in the form
//! `value,sourceBase,targetBase`. Blank lines and `#` comments are skipped.
//! A malformed line is reported on its own and never aborts the batch.

use crate::conversion::ConversionRecord;
use thiserror::Error;

/// A well-formed batch line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub value: String,
    pub source_base: u32,
    pub target_base: u32,
}

/// Why a batch line was rejected before reaching the converter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchLineError {
    #[error("expected 'value,sourceBase,targetBase' but found {found} field(s)")]
    FieldCount { found: usize },

    #[error("'{field}' is not an integer base")]
    InvalidBase { field: String },
}

/// Parses one `value,sourceBase,targetBase` line. Fields are trimmed.
pub fn parse_batch_line(line: &str) -> Result<BatchRequest, BatchLineError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [value, source, target] = fields.as_slice() else {
        return Err(BatchLineError::FieldCount {
            found: fields.len(),
        });
    };

    Ok(BatchRequest {
        value: value.to_string(),
        source_base: parse_base(source)?,
        target_base: parse_base(target)?,
    })
}

fn parse_base(field: &str) -> Result<u32, BatchLineError> {
    field.parse().map_err(|_| BatchLineError::InvalidBase {
        field: field.to_string(),
    })
}

/// Parses every meaningful line of `input`, keeping 1-based line numbers.
pub fn parse_batch(input: &str) -> Vec<(usize, Result<BatchRequest, BatchLineError>)> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| (index + 1, parse_batch_line(line)))
        .collect()
}

/// Result of one batch line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The line reached the converter; the record may still hold a failure.
    Recorded(ConversionRecord),
    /// The line could not be parsed.
    Rejected(BatchLineError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub line_number: usize,
    pub outcome: BatchOutcome,
}

/// Per-line outcomes of a batch run, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Lines that produced a record (successful or not).
    pub fn recorded(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, BatchOutcome::Recorded(_)))
            .count()
    }

    /// Lines rejected by the parser.
    pub fn rejected(&self) -> usize {
        self.entries.len() - self.recorded()
    }
}
