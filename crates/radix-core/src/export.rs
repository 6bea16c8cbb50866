//! Plain-text export layout.

use crate::conversion::ConversionRecord;
use crate::session::HistoryStore;
use std::fmt::Write;

/// One formatted record per line.
pub fn format_records(records: &[ConversionRecord]) -> String {
    let mut out = String::new();
    for record in records {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", record);
    }
    out
}

/// Each date on its own line, then its records, then a blank line.
pub fn format_history(history: &HistoryStore) -> String {
    let mut out = String::new();
    for (date, records) in history.iter() {
        let _ = writeln!(out, "{}", date);
        out.push_str(&format_records(records));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_records() {
        let records = vec![
            ConversionRecord::converted("ff", 16, 2, "11111111"),
            ConversionRecord::failed("g", 16, 10, "bad"),
        ];

        let text = format_records(&records);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Result : 11111111 - Error Message - No Error Message"));
        assert!(lines[1].ends_with("Result : No Result - Error Message - bad"));
    }

    #[test]
    fn test_format_history_groups_by_date() {
        let mut history = HistoryStore::new();
        let date = NaiveDate::from_ymd_opt(2025, 8, 26).unwrap();
        history.append(date, vec![ConversionRecord::converted("1", 2, 10, "1")]);

        let text = format_history(&history);

        assert!(text.starts_with("2025-08-26\nValue : 1 - Source Base : 2"));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_format_empty_history() {
        assert_eq!(format_history(&HistoryStore::new()), "");
    }
}
