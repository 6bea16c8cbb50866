//! Per-date conversion history.

use crate::conversion::ConversionRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Archive of completed sessions, bucketed by calendar date.
///
/// Buckets only grow: records are appended to the end of a date's bucket
/// and nothing is rewritten in place. Iteration is in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStore {
    by_date: BTreeMap<NaiveDate, Vec<ConversionRecord>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `records` to the bucket for `date`. An empty batch leaves the
    /// store untouched (no empty bucket is created).
    pub fn append<I>(&mut self, date: NaiveDate, records: I)
    where
        I: IntoIterator<Item = ConversionRecord>,
    {
        let mut records = records.into_iter().peekable();
        if records.peek().is_none() {
            return;
        }
        self.by_date.entry(date).or_default().extend(records);
    }

    /// Records performed on `date`, oldest first.
    pub fn on(&self, date: NaiveDate) -> &[ConversionRecord] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    /// Date buckets in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[ConversionRecord])> {
        self.by_date
            .iter()
            .map(|(date, records)| (*date, records.as_slice()))
    }

    /// Every record, by date then insertion order.
    pub fn records(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.by_date.values().flatten()
    }

    pub fn total_records(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
