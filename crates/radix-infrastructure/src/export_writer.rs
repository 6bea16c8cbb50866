//! Plain-text export files.

use chrono::Local;
use radix_core::conversion::ConversionRecord;
use radix_core::error::Result;
use radix_core::export::{format_history, format_records};
use radix_core::session::HistoryStore;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes session and history exports into one directory.
///
/// File names are `<username>-<kind>-<YYYYMMDD-HHMMSSmmm>.txt` in local time.
#[derive(Debug, Clone)]
pub struct FileExporter {
    export_dir: PathBuf,
}

impl FileExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// One formatted record per line. Returns the written path.
    pub fn write_session(&self, username: &str, records: &[ConversionRecord]) -> Result<PathBuf> {
        self.write(username, "session", &format_records(records))
    }

    /// Every date bucket in ascending order. Returns the written path.
    pub fn write_history(&self, username: &str, history: &HistoryStore) -> Result<PathBuf> {
        self.write(username, "history", &format_history(history))
    }

    fn write(&self, username: &str, kind: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.export_dir)?;

        let stamp = Local::now().format("%Y%m%d-%H%M%S%3f");
        let path = self
            .export_dir
            .join(format!("{}-{}-{}.txt", username, kind, stamp));
        fs::write(&path, contents)?;

        tracing::info!("Exported {} for '{}' to {}", kind, username, path.display());
        Ok(path)
    }
}
