//! Session domain module.
//!
//! # Module Structure
//!
//! - `ledger`: the live session's conversion attempts with single-step undo
//! - `history`: completed sessions bucketed by calendar date

mod history;
mod ledger;

pub use history::HistoryStore;
pub use ledger::SessionLedger;
