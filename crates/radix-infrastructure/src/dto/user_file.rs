//! UserFile DTOs
//!
//! One file per user holding the profile and the archived history:
//!
//! ```toml
//! schema_version = "1.0.0"
//! username = "alice"
//! created_at = "2025-08-26T09:00:00Z"
//!
//! [[history.2025-08-26]]
//! input_value = "101"
//! source_base = 2
//! target_base = 10
//! result = "5"
//! ```

use super::conversion_record::ConversionRecordV1_0_0;
use chrono::{DateTime, NaiveDate, Utc};
use radix_core::conversion::ConversionRecord;
use radix_core::session::HistoryStore;
use radix_core::user::User;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use version_migrate::{FromDomain, IntoDomain, Versioned};

/// Current schema version for UserFileV1_0_0.
pub const USER_FILE_VERSION: &str = "1.0.0";

/// User file V1.0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct UserFileV1_0_0 {
    /// The schema version of this data structure.
    #[serde(default = "default_user_file_version")]
    pub schema_version: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    /// Archived records keyed by calendar date.
    #[serde(default)]
    pub history: BTreeMap<NaiveDate, Vec<ConversionRecordV1_0_0>>,
}

fn default_user_file_version() -> String {
    USER_FILE_VERSION.to_string()
}

/// Type alias for the latest UserFile version.
pub type UserFileDTO = UserFileV1_0_0;

impl UserFileV1_0_0 {
    /// Rejects files written by an unknown schema or holding malformed
    /// records.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != USER_FILE_VERSION {
            return Err(format!(
                "unsupported schema_version '{}' (expected '{}')",
                self.schema_version, USER_FILE_VERSION
            ));
        }

        for (date, records) in &self.history {
            for record in records {
                record.validate().map_err(|e| format!("{}: {}", date, e))?;
            }
        }

        Ok(())
    }
}

impl IntoDomain<User> for UserFileV1_0_0 {
    fn into_domain(self) -> User {
        let mut history = HistoryStore::new();
        for (date, records) in self.history {
            history.append(
                date,
                records
                    .into_iter()
                    .map(IntoDomain::<ConversionRecord>::into_domain),
            );
        }

        User {
            username: self.username,
            created_at: self.created_at,
            history,
        }
    }
}

impl FromDomain<User> for UserFileV1_0_0 {
    fn from_domain(user: User) -> Self {
        let history = user
            .history
            .iter()
            .map(|(date, records)| {
                let records: Vec<ConversionRecordV1_0_0> = records
                    .iter()
                    .cloned()
                    .map(ConversionRecordV1_0_0::from_domain)
                    .collect();
                (date, records)
            })
            .collect();

        UserFileV1_0_0 {
            schema_version: USER_FILE_VERSION.to_string(),
            username: user.username,
            created_at: user.created_at,
            history,
        }
    }
}
