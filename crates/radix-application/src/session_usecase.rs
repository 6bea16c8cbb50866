//! Converter session use case.
//!
//! `ConverterSession` owns one user's live ledger between login and
//! logout and coordinates it with the `UserRepository` and the export
//! writer.

use chrono::NaiveDate;
use radix_core::RadixError;
use radix_core::batch::BatchReport;
use radix_core::config::RadixConfig;
use radix_core::conversion::{ConversionRecord, Converter};
use radix_core::error::Result;
use radix_core::quiz::Quiz;
use radix_core::session::SessionLedger;
use radix_core::stats::{DailySummary, SessionSummary};
use radix_core::user::{User, UserRepository};
use radix_infrastructure::FileExporter;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One logged-in user's conversion session.
///
/// # Responsibilities
///
/// - Recording conversions and undos in the session ledger
/// - Producing session and per-date history reports
/// - Exporting the ledger or the stored history to text files
/// - Flushing the ledger into the user's history on [`end`](Self::end)
///
/// Each session has its own ledger. Concurrent sessions of the same user
/// are serialized by the repository when they flush.
pub struct ConverterSession {
    user: User,
    ledger: SessionLedger,
    config: RadixConfig,
    repository: Arc<dyn UserRepository>,
    exporter: FileExporter,
}

impl ConverterSession {
    /// Loads `username`, or creates and persists a new user.
    ///
    /// # Errors
    ///
    /// - `RadixError::Validation` for an unusable username
    /// - Storage errors from the repository
    pub fn open_or_create(repository: &dyn UserRepository, username: &str) -> Result<User> {
        let user = repository.find_or_create(username)?;
        tracing::info!(
            "Opened user '{}' ({} archived record(s))",
            user.username,
            user.history.total_records()
        );
        Ok(user)
    }

    /// Starts a session with an empty ledger and no undos.
    pub fn start(
        user: User,
        config: RadixConfig,
        repository: Arc<dyn UserRepository>,
        exporter: FileExporter,
    ) -> Self {
        tracing::info!(
            "Session started for '{}' (precision {})",
            user.username,
            config.precision
        );

        Self {
            ledger: SessionLedger::new(Converter::new(config.precision)),
            user,
            config,
            repository,
            exporter,
        }
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    pub fn config(&self) -> &RadixConfig {
        &self.config
    }

    /// Converts and records one value. Failures come back inside the record.
    pub fn convert(&mut self, value: &str, source_base: u32, target_base: u32) -> ConversionRecord {
        self.ledger.record(value, source_base, target_base)
    }

    /// Removes the latest record. `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.ledger.undo_last()
    }

    pub fn session_summary(&self) -> SessionSummary {
        SessionSummary::from_ledger(&self.ledger, self.config.top_pairs)
    }

    /// One summary per archived date, oldest first. The live ledger is not
    /// included until the session ends.
    pub fn history_report(&self) -> Vec<DailySummary> {
        DailySummary::for_history(&self.user.history, self.config.top_pairs)
    }

    /// Records every well-formed `value,source,target` line of `path`.
    ///
    /// # Errors
    ///
    /// Returns `RadixError::Io` if the file cannot be read. Malformed lines
    /// are reported in the `BatchReport`, not as errors.
    pub fn run_batch(&mut self, path: &Path) -> Result<BatchReport> {
        let input = fs::read_to_string(path).map_err(|e| {
            tracing::warn!("Cannot read batch file {}: {}", path.display(), e);
            RadixError::io(format!("{}: {}", path.display(), e))
        })?;

        let report = self.ledger.record_batch(&input);
        tracing::info!(
            "Batch {}: {} recorded, {} rejected",
            path.display(),
            report.recorded(),
            report.rejected()
        );
        Ok(report)
    }

    pub fn export_session(&self) -> Result<PathBuf> {
        self.exporter
            .write_session(&self.user.username, self.ledger.records())
    }

    pub fn export_history(&self) -> Result<PathBuf> {
        self.exporter
            .write_history(&self.user.username, &self.user.history)
    }

    /// A fresh quiz of `quiz_questions` questions. Answers are not recorded.
    pub fn new_quiz<R: Rng + ?Sized>(&self, rng: &mut R) -> Quiz {
        Quiz::generate(rng, self.config.quiz_questions)
    }

    /// Ends the session, archiving the ledger under `date`.
    ///
    /// The returned summary describes the ledger as it was before the flush.
    /// An empty ledger writes nothing. If persisting fails the ledger is left
    /// intact so the caller can retry.
    pub fn end(&mut self, date: NaiveDate) -> Result<SessionSummary> {
        let summary = self.session_summary();
        if self.ledger.is_empty() {
            tracing::info!("Session for '{}' ended with no conversions", self.user.username);
            return Ok(summary);
        }

        self.repository
            .append_history(&self.user.username, date, self.ledger.records())?;
        self.ledger.flush_to_history(&mut self.user.history, date);

        tracing::info!(
            "Session for '{}' ended: {} conversion(s) archived under {}",
            self.user.username,
            summary.total,
            date
        );
        Ok(summary)
    }
}
