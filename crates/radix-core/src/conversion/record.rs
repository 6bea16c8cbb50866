//! Conversion record domain model.

use super::engine::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a conversion attempt ended.
///
/// Exactly one of a result or an error message exists for every completed
/// attempt; the enum makes the "both" and "neither" states unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    Converted { result: String },
    Failed { error_message: String },
}

impl From<Result<String, ConversionError>> for ConversionOutcome {
    fn from(outcome: Result<String, ConversionError>) -> Self {
        match outcome {
            Ok(result) => Self::Converted { result },
            Err(err) => Self::Failed {
                error_message: err.to_string(),
            },
        }
    }
}

/// One conversion attempt: the raw input, both bases, and the outcome.
///
/// Records are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRecord {
    input_value: String,
    source_base: u32,
    target_base: u32,
    #[serde(flatten)]
    outcome: ConversionOutcome,
}

impl ConversionRecord {
    pub fn new(
        input_value: impl Into<String>,
        source_base: u32,
        target_base: u32,
        outcome: impl Into<ConversionOutcome>,
    ) -> Self {
        Self {
            input_value: input_value.into(),
            source_base,
            target_base,
            outcome: outcome.into(),
        }
    }

    /// Builds a successful record.
    pub fn converted(
        input_value: impl Into<String>,
        source_base: u32,
        target_base: u32,
        result: impl Into<String>,
    ) -> Self {
        Self::new(
            input_value,
            source_base,
            target_base,
            ConversionOutcome::Converted {
                result: result.into(),
            },
        )
    }

    /// Builds a failed record.
    pub fn failed(
        input_value: impl Into<String>,
        source_base: u32,
        target_base: u32,
        error_message: impl Into<String>,
    ) -> Self {
        Self::new(
            input_value,
            source_base,
            target_base,
            ConversionOutcome::Failed {
                error_message: error_message.into(),
            },
        )
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn source_base(&self) -> u32 {
        self.source_base
    }

    pub fn target_base(&self) -> u32 {
        self.target_base
    }

    pub fn outcome(&self) -> &ConversionOutcome {
        &self.outcome
    }

    /// The converted value, if the attempt succeeded.
    pub fn result(&self) -> Option<&str> {
        match &self.outcome {
            ConversionOutcome::Converted { result } => Some(result),
            ConversionOutcome::Failed { .. } => None,
        }
    }

    /// The failure message, if the attempt failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            ConversionOutcome::Converted { .. } => None,
            ConversionOutcome::Failed { error_message } => Some(error_message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ConversionOutcome::Converted { .. })
    }

    /// `"{source} -> {target}"`, the key used for base pair statistics.
    pub fn base_pair(&self) -> String {
        format!("{} -> {}", self.source_base, self.target_base)
    }
}

/// Export line layout.
impl fmt::Display for ConversionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Value : {} - Source Base : {} - Target Base : {} - Result : {} - Error Message - {}",
            self.input_value,
            self.source_base,
            self.target_base,
            self.result().unwrap_or("No Result"),
            self.error_message().unwrap_or("No Error Message"),
        )
    }
}
