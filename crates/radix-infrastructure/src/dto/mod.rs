//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs are the versioned on-disk schema. They stay private to the
//! infrastructure layer so the domain types can change without breaking
//! stored user files.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes (field removal, type changes)
//! - **MINOR (1.X.0)**: Backward-compatible additions (new optional fields)
//!
//! ### UserFile Version History
//! - **1.0.0**: Initial schema (username, created_at, per-date history)

mod conversion_record;
mod user_file;

pub use conversion_record::ConversionRecordV1_0_0;
pub use user_file::{USER_FILE_VERSION, UserFileDTO, UserFileV1_0_0};
