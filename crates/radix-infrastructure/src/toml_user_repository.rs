//! TOML-based UserRepository implementation

use crate::dto::{ConversionRecordV1_0_0, UserFileDTO};
use crate::storage::AtomicTomlFile;
use chrono::NaiveDate;
use radix_core::RadixError;
use radix_core::conversion::ConversionRecord;
use radix_core::error::Result;
use radix_core::user::{User, UserRepository, validate_username};
use std::fs;
use std::path::{Path, PathBuf};
use version_migrate::{FromDomain, IntoDomain};

/// Stores each user in `<users_dir>/<username>.toml`.
///
/// Responsibilities:
/// - Map usernames to files
/// - Validate and convert between DTOs and domain models
///
/// Does NOT:
/// - Implement atomic writes or locking (delegated to AtomicTomlFile)
pub struct TomlUserRepository {
    users_dir: PathBuf,
}

impl TomlUserRepository {
    pub fn new(users_dir: impl Into<PathBuf>) -> Self {
        Self {
            users_dir: users_dir.into(),
        }
    }

    pub fn users_dir(&self) -> &Path {
        &self.users_dir
    }

    fn user_file(&self, username: &str) -> Result<AtomicTomlFile<UserFileDTO>> {
        let username = validate_username(username)?;
        Ok(AtomicTomlFile::new(
            self.users_dir.join(format!("{}.toml", username)),
        ))
    }

    /// Rejects unknown schema versions, malformed records and files whose
    /// `username` does not match their name.
    fn check(path: &Path, username: &str, dto: &UserFileDTO) -> Result<()> {
        let corrupt = |message: String| {
            RadixError::serialization("TOML", format!("{}: {}", path.display(), message))
        };

        dto.validate().map_err(corrupt)?;
        if dto.username != username {
            return Err(corrupt(format!(
                "file belongs to '{}', expected '{}'",
                dto.username, username
            )));
        }
        Ok(())
    }
}

impl UserRepository for TomlUserRepository {
    fn find(&self, username: &str) -> Result<Option<User>> {
        let username = validate_username(username)?;
        let file = self.user_file(&username)?;

        let Some(dto) = file.load()? else {
            return Ok(None);
        };

        Self::check(file.path(), &username, &dto)?;
        Ok(Some(dto.into_domain()))
    }

    fn find_or_create(&self, username: &str) -> Result<User> {
        let username = validate_username(username)?;
        let file = self.user_file(&username)?;

        let dto = file.load_or_insert_with(|| {
            tracing::info!("Creating user '{}' at {}", username, file.path().display());
            Ok(UserFileDTO::from_domain(User::new(&username)?))
        })?;

        Self::check(file.path(), &username, &dto)?;
        Ok(dto.into_domain())
    }

    fn save(&self, user: &User) -> Result<()> {
        let file = self.user_file(&user.username)?;
        let dto = UserFileDTO::from_domain(user.clone());
        // Taken under the lock so a save never interleaves with an append.
        file.update(|_| Ok(dto))?;

        tracing::debug!("Saved user '{}' to {}", user.username, file.path().display());
        Ok(())
    }

    fn append_history(
        &self,
        username: &str,
        date: NaiveDate,
        records: &[ConversionRecord],
    ) -> Result<()> {
        let username = validate_username(username)?;
        if records.is_empty() {
            return Ok(());
        }

        let file = self.user_file(&username)?;
        let path = file.path().to_path_buf();

        file.update(|current| {
            let mut dto = current.ok_or_else(|| RadixError::not_found("User", &username))?;
            Self::check(&path, &username, &dto)?;

            dto.history.entry(date).or_default().extend(
                records
                    .iter()
                    .cloned()
                    .map(ConversionRecordV1_0_0::from_domain),
            );
            Ok(dto)
        })?;

        tracing::info!(
            "Appended {} record(s) for '{}' on {}",
            records.len(),
            username,
            date
        );
        Ok(())
    }

    fn list_usernames(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.users_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut usernames = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if validate_username(stem).is_ok() {
                    usernames.push(stem.to_string());
                }
            }
        }

        usernames.sort();
        Ok(usernames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn setup() -> (TempDir, TomlUserRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlUserRepository::new(temp_dir.path().join("users"));
        (temp_dir, repo)
    }

    #[test]
    fn test_find_unknown_user() {
        let (_dir, repo) = setup();
        assert!(repo.find("nobody").unwrap().is_none());
    }

    #[test]
    fn test_rejects_unsafe_username() {
        let (_dir, repo) = setup();
        assert!(repo.find("../escape").unwrap_err().is_validation());
    }

    #[test]
    fn test_append_requires_saved_user() {
        let (_dir, repo) = setup();
        let records = vec![ConversionRecord::converted("1", 2, 10, "1")];

        let err = repo.append_history("ghost", date(26), &records).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_append_empty_is_noop() {
        let (_dir, repo) = setup();
        repo.append_history("ghost", date(26), &[]).unwrap();
        assert!(repo.list_usernames().unwrap().is_empty());
    }

    #[test]
    fn test_append_extends_same_date() {
        let (_dir, repo) = setup();
        repo.save(&User::new("alice").unwrap()).unwrap();

        repo.append_history("alice", date(26), &[ConversionRecord::converted("1", 2, 10, "1")])
            .unwrap();
        repo.append_history("alice", date(26), &[ConversionRecord::failed("2", 2, 10, "bad")])
            .unwrap();

        let user = repo.find("alice").unwrap().unwrap();
        let bucket = user.history.on(date(26));
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket[0].input_value(), "1");
        assert_eq!(bucket[1].error_message(), Some("bad"));
    }

    #[test]
    fn test_mismatched_username_is_corrupt() {
        let (_dir, repo) = setup();
        repo.save(&User::new("alice").unwrap()).unwrap();
        fs::copy(
            repo.users_dir().join("alice.toml"),
            repo.users_dir().join("mallory.toml"),
        )
        .unwrap();

        assert!(repo.find("mallory").unwrap_err().is_serialization());
        assert!(repo.find("alice").unwrap().is_some());
    }

    #[test]
    fn test_find_or_create_creates_once() {
        let (_dir, repo) = setup();

        let created = repo.find_or_create("alice").unwrap();
        assert_eq!(created.username, "alice");
        assert!(created.history.is_empty());

        repo.append_history("alice", date(26), &[ConversionRecord::converted("1", 2, 10, "1")])
            .unwrap();

        let reopened = repo.find_or_create("alice").unwrap();
        assert_eq!(reopened.created_at, created.created_at);
        assert_eq!(reopened.history.on(date(26)).len(), 1);
        assert_eq!(repo.list_usernames().unwrap(), vec!["alice"]);
    }

    #[test]
    fn test_find_or_create_rejects_corrupt_file() {
        let (_dir, repo) = setup();
        fs::create_dir_all(repo.users_dir()).unwrap();
        fs::write(repo.users_dir().join("alice.toml"), "username = [").unwrap();

        assert!(repo.find_or_create("alice").unwrap_err().is_serialization());
        assert!(repo.find_or_create("a b").unwrap_err().is_validation());
    }

    #[test]
    fn test_list_usernames_sorted() {
        let (_dir, repo) = setup();
        for name in ["carol", "alice", "bob"] {
            repo.save(&User::new(name).unwrap()).unwrap();
        }

        assert_eq!(repo.list_usernames().unwrap(), vec!["alice", "bob", "carol"]);
    }
}
