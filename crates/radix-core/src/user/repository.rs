//! User repository trait.
//!
//! Defines the interface for user and history persistence.

use super::model::User;
use crate::conversion::ConversionRecord;
use crate::error::Result;
use chrono::NaiveDate;

/// An abstract repository for users and their per-date history.
///
/// # Implementation Notes
///
/// `append_history` must not lose records when two sessions of the same
/// user flush concurrently: implementations serialize the
/// load-append-save sequence (file lock, single writer, transaction).
pub trait UserRepository: Send + Sync {
    /// Finds a user by username.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))`: User found
    /// - `Ok(None)`: No such user
    /// - `Err(_)`: Storage could not be read or parsed
    fn find(&self, username: &str) -> Result<Option<User>>;

    /// Returns the stored user, creating and persisting an empty one if
    /// `username` has never been saved.
    ///
    /// Lookup and creation are one atomic step: a history appended by a
    /// concurrent session is never replaced by the new empty user.
    ///
    /// # Errors
    ///
    /// - `RadixError::Validation` for an unusable username
    /// - Storage errors if the existing user cannot be read or parsed
    fn find_or_create(&self, username: &str) -> Result<User>;

    /// Saves the whole user, replacing what is stored.
    fn save(&self, user: &User) -> Result<()>;

    /// Appends `records` to the stored bucket for `date`.
    ///
    /// # Errors
    ///
    /// Returns `RadixError::NotFound` if the user has never been saved.
    fn append_history(
        &self,
        username: &str,
        date: NaiveDate,
        records: &[ConversionRecord],
    ) -> Result<()>;

    /// Lists stored usernames in ascending order.
    fn list_usernames(&self) -> Result<Vec<String>>;
}
