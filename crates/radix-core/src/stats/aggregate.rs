//! Read-only aggregations over conversion records.
//!
//! Every function takes any iterator of record references, so the same code
//! serves the live ledger, one history date, or the whole history.

use crate::conversion::ConversionRecord;
use std::collections::HashMap;
use std::hash::Hash;

/// Which base of a record to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSide {
    Source,
    Target,
}

/// Counts records that hold a result.
pub fn count_success<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a ConversionRecord>,
{
    records
        .into_iter()
        .filter(|record| record.result().is_some())
        .count()
}

/// Counts records that hold an error message.
pub fn count_failure<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a ConversionRecord>,
{
    records
        .into_iter()
        .filter(|record| record.error_message().is_some())
        .count()
}

/// The most frequent source or target base. Ties go to the base seen first.
///
/// Returns `None` for an empty input.
pub fn most_frequent_base<'a, I>(records: I, side: BaseSide) -> Option<u32>
where
    I: IntoIterator<Item = &'a ConversionRecord>,
{
    let mut table = FrequencyTable::default();
    for record in records {
        table.bump(match side {
            BaseSide::Source => record.source_base(),
            BaseSide::Target => record.target_base(),
        });
    }
    table.ranked().into_iter().next().map(|(base, _)| base)
}

/// The `n` most frequent `"{source} -> {target}"` pairs with their counts,
/// by descending count. Ties keep first-encountered order.
pub fn top_base_pairs<'a, I>(records: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a ConversionRecord>,
{
    let mut table = FrequencyTable::default();
    for record in records {
        table.bump(record.base_pair());
    }

    let mut ranked = table.ranked();
    ranked.truncate(n);
    ranked
}

/// Counts keys while remembering the order they were first seen.
struct FrequencyTable<K> {
    counts: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> FrequencyTable<K> {
    fn bump(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Entries by descending count; the sort is stable so first-seen wins ties.
    fn ranked(self) -> Vec<(K, usize)> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(source: u32, target: u32) -> ConversionRecord {
        ConversionRecord::converted("1", source, target, "1")
    }

    fn failed(source: u32, target: u32) -> ConversionRecord {
        ConversionRecord::failed("?", source, target, "invalid")
    }

    #[test]
    fn test_success_and_failure_counts() {
        let records = vec![ok(2, 10), failed(16, 2), ok(8, 2)];

        assert_eq!(count_success(&records), 2);
        assert_eq!(count_failure(&records), 1);
        assert_eq!(
            count_success(&records) + count_failure(&records),
            records.len()
        );
    }

    #[test]
    fn test_top_pair_counts_repeated_pair() {
        let records = vec![ok(2, 10), ok(2, 10), ok(16, 2)];

        assert_eq!(
            top_base_pairs(&records, 1),
            vec![("2 -> 10".to_string(), 2)]
        );
    }

    #[test]
    fn test_top_pairs_ties_keep_first_seen_order() {
        let records = vec![ok(16, 2), ok(8, 10), ok(2, 10), ok(8, 10), ok(16, 2)];

        assert_eq!(
            top_base_pairs(&records, 5),
            vec![
                ("16 -> 2".to_string(), 2),
                ("8 -> 10".to_string(), 2),
                ("2 -> 10".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_pairs_zero_cutoff() {
        let records = vec![ok(2, 10)];
        assert!(top_base_pairs(&records, 0).is_empty());
    }

    #[test]
    fn test_most_frequent_base_by_side() {
        let records = vec![ok(2, 10), ok(16, 10), ok(16, 2), failed(16, 8)];

        assert_eq!(most_frequent_base(&records, BaseSide::Source), Some(16));
        assert_eq!(most_frequent_base(&records, BaseSide::Target), Some(10));
    }

    #[test]
    fn test_most_frequent_base_tie_goes_to_first_seen() {
        let records = vec![ok(8, 2), ok(10, 16), ok(10, 2), ok(8, 16)];

        assert_eq!(most_frequent_base(&records, BaseSide::Source), Some(8));
        assert_eq!(most_frequent_base(&records, BaseSide::Target), Some(2));
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<ConversionRecord> = Vec::new();

        assert_eq!(count_success(&records), 0);
        assert_eq!(most_frequent_base(&records, BaseSide::Source), None);
        assert!(top_base_pairs(&records, 3).is_empty());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = vec![ok(2, 10), ok(16, 2)];
        let before = records.clone();

        let _ = top_base_pairs(&records, 1);
        let _ = most_frequent_base(&records, BaseSide::Target);

        assert_eq!(records, before);
    }
}
