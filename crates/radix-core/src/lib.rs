//! Domain layer for RADIX.
//!
//! Pure conversion logic, the session ledger and history, statistics, and
//! the repository interfaces the infrastructure layer implements.

pub mod batch;
pub mod config;
pub mod conversion;
pub mod error;
pub mod export;
pub mod quiz;
pub mod session;
pub mod stats;
pub mod user;

// Re-export common error type
pub use error::RadixError;
