//! Crash-safe TOML documents.
//!
//! Writes land in a sibling temp file which is fsynced and then renamed over
//! the target, so readers see either the old document or the new one.
//! Read-modify-write cycles additionally hold an exclusive `fs2` lock on a
//! `<stem>.lock` sibling.

use radix_core::RadixError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Distinguishes temp files of concurrent saves within one process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors that can occur while reading or writing an [`AtomicTomlFile`].
#[derive(Debug)]
pub enum AtomicTomlError {
    /// File I/O error.
    Io(std::io::Error),
    /// The document on disk is not valid TOML for the target type.
    Parse(toml::de::Error),
    /// The value could not be encoded as TOML.
    Encode(toml::ser::Error),
    /// The exclusive lock could not be taken.
    Lock(String),
    /// The update closure refused to produce a new document.
    Aborted(RadixError),
}

impl std::fmt::Display for AtomicTomlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicTomlError::Io(e) => write!(f, "I/O error: {}", e),
            AtomicTomlError::Parse(e) => write!(f, "TOML parse error: {}", e),
            AtomicTomlError::Encode(e) => write!(f, "TOML serialization error: {}", e),
            AtomicTomlError::Lock(e) => write!(f, "Lock error: {}", e),
            AtomicTomlError::Aborted(e) => write!(f, "Update aborted: {}", e),
        }
    }
}

impl std::error::Error for AtomicTomlError {}

impl From<std::io::Error> for AtomicTomlError {
    fn from(e: std::io::Error) -> Self {
        AtomicTomlError::Io(e)
    }
}

impl From<toml::de::Error> for AtomicTomlError {
    fn from(e: toml::de::Error) -> Self {
        AtomicTomlError::Parse(e)
    }
}

impl From<toml::ser::Error> for AtomicTomlError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicTomlError::Encode(e)
    }
}

impl From<AtomicTomlError> for RadixError {
    fn from(e: AtomicTomlError) -> Self {
        match e {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Encode(e) => e.into(),
            AtomicTomlError::Lock(message) => RadixError::storage(message),
            AtomicTomlError::Aborted(inner) => inner,
        }
    }
}

/// A typed handle to one TOML document on disk.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Document parsed
    /// - `Ok(None)`: File is missing or blank
    /// - `Err`: File could not be read or parsed
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Replaces the document with `data`.
    ///
    /// Creates the parent directory when needed.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let encoded = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(())
    }

    /// Runs a locked load-modify-save cycle.
    ///
    /// `f` receives the current document (`None` when the file is missing)
    /// and returns the document to write. If `f` fails nothing is written and
    /// its error comes back as [`AtomicTomlError::Aborted`].
    pub fn update<F>(&self, f: F) -> Result<(), AtomicTomlError>
    where
        F: FnOnce(Option<T>) -> radix_core::error::Result<T>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let current = self.load()?;
        let next = f(current).map_err(AtomicTomlError::Aborted)?;
        self.save(&next)
    }

    /// Returns the stored document, or writes and returns `create()` when
    /// the file is missing or blank.
    ///
    /// The check and the write happen under the same lock as [`update`], so
    /// a concurrent update is never overwritten by the freshly created value.
    ///
    /// [`update`]: Self::update
    pub fn load_or_insert_with<F>(&self, create: F) -> Result<T, AtomicTomlError>
    where
        F: FnOnce() -> radix_core::error::Result<T>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        if let Some(existing) = self.load()? {
            return Ok(existing);
        }
        let created = create().map_err(AtomicTomlError::Aborted)?;
        self.save(&created)?;
        Ok(created)
    }

    /// `.<file name>.<pid>.<n>.tmp` next to the target. Every call gets a new
    /// name, so no two saves share a temp file, whether they run in different
    /// processes or on different threads.
    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let invalid = |msg: &str| {
            AtomicTomlError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, msg))
        };

        let parent = self
            .path
            .parent()
            .ok_or_else(|| invalid("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| invalid("Path has no file name"))?;

        Ok(parent.join(format!(
            ".{}.{}.{}.tmp",
            file_name.to_string_lossy(),
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        )))
    }
}

/// Exclusive lock held for the lifetime of the guard.
///
/// The lock file itself is left in place: unlinking it while another
/// process waits on the old inode would let a third process lock a fresh one.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        use fs2::FileExt;

        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive().map_err(|e| {
            AtomicTomlError::Lock(format!(
                "Failed to lock {}: {}",
                lock_path.display(),
                e
            ))
        })?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        use fs2::FileExt;
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        label: String,
        count: u32,
    }

    fn counter(count: u32) -> Counter {
        Counter {
            label: "flushes".to_string(),
            count,
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("nested/counter.toml"));

        file.save(&counter(42)).unwrap();

        assert_eq!(file.load().unwrap(), Some(counter(42)));
    }

    #[test]
    fn test_load_missing_or_blank_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        let file = AtomicTomlFile::<Counter>::new(path.clone());

        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_rejects_malformed_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        fs::write(&path, "label = [").unwrap();

        let err = AtomicTomlFile::<Counter>::new(path).load().unwrap_err();
        assert!(matches!(err, AtomicTomlError::Parse(_)));
        assert!(RadixError::from(err).is_serialization());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        file.save(&counter(1)).unwrap();

        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["counter.toml".to_string()]);
    }

    #[test]
    fn test_update_creates_then_modifies() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        file.update(|current| {
            assert!(current.is_none());
            Ok(counter(10))
        })
        .unwrap();

        file.update(|current| {
            let mut c = current.unwrap();
            c.count += 5;
            Ok(c)
        })
        .unwrap();

        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_aborted_update_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));
        file.save(&counter(3)).unwrap();

        let err = file
            .update(|_| Err(RadixError::validation("refused")))
            .unwrap_err();

        assert!(RadixError::from(err).is_validation());
        assert_eq!(file.load().unwrap().unwrap().count, 3);
    }

    #[test]
    fn test_temp_paths_are_unique_per_save() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        let first = file.temp_path().unwrap();
        let second = file.temp_path().unwrap();

        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(temp_dir.path()));
    }

    #[test]
    fn test_load_or_insert_with_keeps_existing_document() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        let created = file.load_or_insert_with(|| Ok(counter(1))).unwrap();
        assert_eq!(created, counter(1));

        file.update(|current| {
            let mut c = current.unwrap();
            c.count += 1;
            Ok(c)
        })
        .unwrap();

        let loaded = file
            .load_or_insert_with(|| panic!("document already exists"))
            .unwrap();
        assert_eq!(loaded, counter(2));
    }

    #[test]
    fn test_concurrent_inserts_and_updates_lose_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = Arc::new(temp_dir.path().join("counter.toml"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = Arc::clone(&path);
                std::thread::spawn(move || {
                    let file = AtomicTomlFile::<Counter>::new(path.as_ref().clone());
                    file.load_or_insert_with(|| Ok(counter(0))).unwrap();
                    file.update(|current| {
                        let mut c = current.unwrap();
                        c.count += 1;
                        Ok(c)
                    })
                    .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let file = AtomicTomlFile::<Counter>::new(path.as_ref().clone());
        assert_eq!(file.load().unwrap().unwrap().count, 8);
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        AtomicTomlFile::<Counter>::new(path.clone())
            .save(&counter(0))
            .unwrap();

        let path = Arc::new(path);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = Arc::clone(&path);
                std::thread::spawn(move || {
                    let file = AtomicTomlFile::<Counter>::new(path.as_ref().clone());
                    file.update(|current| {
                        let mut c = current.unwrap();
                        c.count += 1;
                        Ok(c)
                    })
                    .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let file = AtomicTomlFile::<Counter>::new(path.as_ref().clone());
        assert_eq!(file.load().unwrap().unwrap().count, 8);
    }
}
