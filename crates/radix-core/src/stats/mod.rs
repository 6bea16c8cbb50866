//! Statistics over conversion records.
//!
//! - `aggregate`: pure counting functions (success/failure, most used bases, top pairs)
//! - `summary`: report models for the live session and each history date

mod aggregate;
mod summary;

pub use aggregate::{BaseSide, count_failure, count_success, most_frequent_base, top_base_pairs};
pub use summary::{DailySummary, SessionSummary};
