//! Report models for the live session and the per-date history.

use super::aggregate::{BaseSide, count_failure, count_success, most_frequent_base, top_base_pairs};
use crate::conversion::ConversionRecord;
use crate::session::{HistoryStore, SessionLedger};
use chrono::NaiveDate;
use std::fmt;

/// Statistics for the live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub undo_count: u32,
    pub most_used_source: Option<u32>,
    pub most_used_target: Option<u32>,
    pub top_pairs: Vec<(String, usize)>,
}

impl SessionSummary {
    pub fn from_ledger(ledger: &SessionLedger, top_n: usize) -> Self {
        let records = ledger.records();
        Self {
            total: records.len(),
            successful: count_success(records),
            failed: count_failure(records),
            undo_count: ledger.undo_count(),
            most_used_source: most_frequent_base(records, BaseSide::Source),
            most_used_target: most_frequent_base(records, BaseSide::Target),
            top_pairs: top_base_pairs(records, top_n),
        }
    }
}

/// Statistics for one history date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub most_used_source: Option<u32>,
    pub most_used_target: Option<u32>,
    pub top_pairs: Vec<(String, usize)>,
}

impl DailySummary {
    pub fn new(date: NaiveDate, records: &[ConversionRecord], top_n: usize) -> Self {
        Self {
            date,
            total: records.len(),
            successful: count_success(records),
            failed: count_failure(records),
            most_used_source: most_frequent_base(records, BaseSide::Source),
            most_used_target: most_frequent_base(records, BaseSide::Target),
            top_pairs: top_base_pairs(records, top_n),
        }
    }

    /// One summary per stored date, oldest first.
    pub fn for_history(history: &HistoryStore, top_n: usize) -> Vec<Self> {
        history
            .iter()
            .map(|(date, records)| Self::new(date, records, top_n))
            .collect()
    }
}

struct BaseLabel(Option<u32>);

impl fmt::Display for BaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(base) => write!(f, "{}", base),
            None => f.write_str("None"),
        }
    }
}

fn write_pairs(f: &mut fmt::Formatter<'_>, pairs: &[(String, usize)]) -> fmt::Result {
    writeln!(f, "Most Used Base Pairs:")?;
    if pairs.is_empty() {
        return writeln!(f, " None");
    }
    for (pair, count) in pairs {
        writeln!(f, " {} (Frequency - {})", pair, count)?;
    }
    Ok(())
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Conversions - {}", self.total)?;
        writeln!(f, "Total Successful Conversions - {}", self.successful)?;
        writeln!(f, "Total Failed Conversions - {}", self.failed)?;
        writeln!(f, "Total Undo Operations - {}", self.undo_count)?;
        writeln!(f, "Most Used Source Base - {}", BaseLabel(self.most_used_source))?;
        writeln!(f, "Most Used Target Base - {}", BaseLabel(self.most_used_target))?;
        write_pairs(f, &self.top_pairs)
    }
}

impl fmt::Display for DailySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        writeln!(f, "Total Conversions - {}", self.total)?;
        writeln!(f, "Total Successful Conversions - {}", self.successful)?;
        writeln!(f, "Total Failed Conversions - {}", self.failed)?;
        writeln!(f, "Most Used Source Base - {}", BaseLabel(self.most_used_source))?;
        writeln!(f, "Most Used Target Base - {}", BaseLabel(self.most_used_target))?;
        write_pairs(f, &self.top_pairs)
    }
}
