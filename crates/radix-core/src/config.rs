//! Application configuration model.

use crate::conversion::DEFAULT_PRECISION;
use crate::error::{RadixError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

fn default_top_pairs() -> usize {
    5
}

fn default_quiz_questions() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings read from `config.toml`. Every field is optional in the file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RadixConfig {
    /// Maximum fractional digits emitted per conversion
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Base pairs listed in statistics reports
    #[serde(default = "default_top_pairs")]
    pub top_pairs: usize,
    /// Questions per quiz
    #[serde(default = "default_quiz_questions")]
    pub quiz_questions: usize,
    /// Overrides the platform data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Overrides `<data_dir>/exports`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// Default tracing filter when `RADIX_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RadixConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            top_pairs: default_top_pairs(),
            quiz_questions: default_quiz_questions(),
            data_dir: None,
            export_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl RadixConfig {
    /// Rejects zero counts, which would make reports and quizzes empty.
    pub fn validate(&self) -> Result<()> {
        if self.precision == 0 {
            return Err(RadixError::config("precision must be at least 1"));
        }
        if self.top_pairs == 0 {
            return Err(RadixError::config("top_pairs must be at least 1"));
        }
        if self.quiz_questions == 0 {
            return Err(RadixError::config("quiz_questions must be at least 1"));
        }
        Ok(())
    }
}
