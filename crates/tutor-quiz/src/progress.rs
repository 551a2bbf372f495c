//! Answer-Record Persistence
//!
//! The singleton daily answer record and its day-rollover state machine.
//! A record is valid only while its stored date equals today and its
//! question id equals today's question; anything else is discarded.
//! Malformed persisted JSON is recovered silently (log only) — a first
//! visit with no record is the normal case, not an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{QuizError, Result};
use crate::model::{AnswerRecord, Question};

/// Storage seam for the daily answer record.
///
/// One synchronous read/write per operation; the record is overwritten
/// wholesale on each save.
pub trait AnswerStore: Send + Sync {
    /// Load the stored record, if any. Malformed contents load as `None`.
    fn load(&self) -> Result<Option<AnswerRecord>>;

    /// Overwrite the stored record
    fn save(&self, record: &AnswerRecord) -> Result<()>;

    /// Remove the stored record (day rollover or explicit "try again")
    fn clear(&self) -> Result<()>;

    /// Store name (for logging)
    fn name(&self) -> &str;
}

/// JSON-file-backed store, one fixed path per deployment
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnswerStore for FileStore {
    fn load(&self) -> Result<Option<AnswerRecord>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(QuizError::Storage(e)),
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!("Discarding malformed answer record: {}", e);
                Ok(None)
            }
        }
    }

    fn save(&self, record: &AnswerRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string(record)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(QuizError::Storage(e)),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// In-memory store for tests and demos
#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<Option<AnswerRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<AnswerRecord>> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnswerStore for MemoryStore {
    fn load(&self) -> Result<Option<AnswerRecord>> {
        Ok(self.slot().clone())
    }

    fn save(&self, record: &AnswerRecord) -> Result<()> {
        *self.slot() = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Date-gated view over an [`AnswerStore`]
pub struct DailyProgress {
    store: Box<dyn AnswerStore>,
}

impl DailyProgress {
    pub fn new(store: impl AnswerStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Restore the record for `today`, discarding anything stale.
    ///
    /// A surviving record must match both the day key and the question id
    /// (the question changes with the day, so a mismatched id means the
    /// record predates today's question).
    pub fn restore(&self, today: &str, question: &Question) -> Option<AnswerRecord> {
        let record = match self.store.load() {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(store = self.store.name(), "Failed to load answer record: {}", e);
                return None;
            }
        };

        if record.date == today && record.question_id == question.id {
            Some(record)
        } else {
            tracing::debug!(
                stored = %record.date,
                today = %today,
                "Discarding answer record from another day"
            );
            if let Err(e) = self.store.clear() {
                tracing::warn!("Failed to clear stale answer record: {}", e);
            }
            None
        }
    }

    /// Grade an answer against today's question and persist the record
    pub fn record_answer(
        &self,
        today: &str,
        question: &Question,
        answered_index: usize,
    ) -> Result<AnswerRecord> {
        if answered_index >= question.options.len() {
            return Err(QuizError::AnswerOutOfRange(answered_index));
        }

        let record = AnswerRecord::new(today, question, answered_index);
        self.store.save(&record)?;
        Ok(record)
    }

    /// Explicit "try again": drop the record
    pub fn reset(&self) -> Result<()> {
        self.store.clear()
    }
}
