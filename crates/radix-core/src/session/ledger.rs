//! Session ledger: the ordered record of conversion attempts in one session.

use super::history::HistoryStore;
use crate::batch::{BatchEntry, BatchOutcome, BatchReport, parse_batch};
use crate::conversion::{ConversionRecord, Converter};
use chrono::NaiveDate;

/// Append-only list of the conversions performed in the live session.
///
/// The ledger owns its records. Callers get read-only views and mutate only
/// through [`record`](Self::record), [`undo_last`](Self::undo_last) and
/// [`flush_to_history`](Self::flush_to_history).
#[derive(Debug, Clone, Default)]
pub struct SessionLedger {
    converter: Converter,
    records: Vec<ConversionRecord>,
    undo_count: u32,
}

impl SessionLedger {
    /// Creates an empty ledger that converts with `converter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_core::conversion::Converter;
    /// use radix_core::session::SessionLedger;
    ///
    /// let mut ledger = SessionLedger::new(Converter::default());
    /// let record = ledger.record("ff", 16, 2);
    /// assert_eq!(record.result(), Some("11111111"));
    /// assert_eq!(ledger.len(), 1);
    /// ```
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            records: Vec::new(),
            undo_count: 0,
        }
    }

    /// Runs the conversion, appends the outcome and returns a copy of it.
    ///
    /// Failures are recorded, not returned as errors.
    pub fn record(&mut self, value: &str, source_base: u32, target_base: u32) -> ConversionRecord {
        let outcome = self.converter.convert(value, source_base, target_base);
        if let Err(err) = &outcome {
            tracing::debug!(value, source_base, target_base, error = %err, "Conversion failed");
        } else {
            tracing::debug!(value, source_base, target_base, "Conversion recorded");
        }

        let record = ConversionRecord::new(value, source_base, target_base, outcome);
        self.records.push(record.clone());
        record
    }

    /// Records every well-formed line of a batch file body.
    pub fn record_batch(&mut self, input: &str) -> BatchReport {
        let entries = parse_batch(input)
            .into_iter()
            .map(|(line_number, parsed)| {
                let outcome = match parsed {
                    Ok(request) => BatchOutcome::Recorded(self.record(
                        &request.value,
                        request.source_base,
                        request.target_base,
                    )),
                    Err(err) => {
                        tracing::warn!(line_number, error = %err, "Rejected batch line");
                        BatchOutcome::Rejected(err)
                    }
                };
                BatchEntry {
                    line_number,
                    outcome,
                }
            })
            .collect();

        BatchReport { entries }
    }

    /// Removes the most recent record.
    ///
    /// Returns `false` and changes nothing when the ledger is empty. There is
    /// no redo; each call undoes at most one record.
    pub fn undo_last(&mut self) -> bool {
        if self.records.pop().is_some() {
            self.undo_count += 1;
            true
        } else {
            false
        }
    }

    /// Moves every record into `history` under `date` and clears the ledger.
    ///
    /// Returns the flushed records so the caller can persist them. The undo
    /// counter is left alone; a new session starts from a new ledger.
    pub fn flush_to_history(
        &mut self,
        history: &mut HistoryStore,
        date: NaiveDate,
    ) -> Vec<ConversionRecord> {
        let flushed = std::mem::take(&mut self.records);
        history.append(date, flushed.iter().cloned());
        tracing::info!(count = flushed.len(), %date, "Flushed session ledger to history");
        flushed
    }

    pub fn records(&self) -> &[ConversionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&ConversionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn undo_count(&self) -> u32 {
        self.undo_count
    }

    pub fn converter(&self) -> Converter {
        self.converter
    }
}
