//! User domain model.

use crate::error::{RadixError, Result};
use crate::session::HistoryStore;
use chrono::{DateTime, Utc};

/// A converter user and their archived conversion history.
///
/// The username doubles as the storage key, so it is restricted to
/// `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub history: HistoryStore,
}

impl User {
    /// Creates a user with an empty history.
    ///
    /// # Errors
    ///
    /// Returns `RadixError::Validation` if the username is empty or contains
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn new(username: &str) -> Result<Self> {
        Ok(Self {
            username: validate_username(username)?,
            created_at: Utc::now(),
            history: HistoryStore::new(),
        })
    }
}

/// Trims and validates a username, returning the trimmed form.
pub fn validate_username(username: &str) -> Result<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(RadixError::validation("Username must not be empty"));
    }

    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(RadixError::validation(format!(
            "Username '{}' contains unsupported character '{}'",
            trimmed, bad
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_empty_history() {
        let user = User::new("  alice ").unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.history.is_empty());
    }

    #[test]
    fn test_rejects_empty_username() {
        assert!(User::new("   ").unwrap_err().is_validation());
    }

    #[test]
    fn test_rejects_path_characters() {
        let err = validate_username("../etc").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("'.'"));
    }

    #[test]
    fn test_accepts_dash_and_underscore() {
        assert_eq!(validate_username("guru_charan-2").unwrap(), "guru_charan-2");
    }
}
