//! Record store port - durable entity collections

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::validation::sanitize_str;
use crate::domain::Record;

/// Storage failure. Never fatal to a ledger operation: the service logs it
/// and keeps its in-memory state.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data directory {0:?} is in use by another process")]
    Locked(PathBuf),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Records read back from storage, plus how many lines were dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome<T> {
    pub records: Vec<T>,
    /// Non-blank lines that failed to parse
    pub skipped: usize,
}

impl<T> LoadOutcome<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// Persistence for the three entity collections.
///
/// `save` always rewrites the whole collection in the given order.
pub trait RecordStore {
    fn load<T: Record>(&self) -> StoreResult<LoadOutcome<T>>;

    fn save<T: Record>(&self, records: &[T]) -> StoreResult<()>;
}

/// Parse stored lines: blank lines are ignored, each remaining line is
/// sanitized and parsed, and lines that fail are counted and dropped.
pub fn decode_lines<'a, T, I>(source: &str, lines: I) -> LoadOutcome<T>
where
    T: Record,
    I: IntoIterator<Item = &'a str>,
{
    let mut outcome = LoadOutcome::empty();
    for (index, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match T::from_line(&sanitize_str(line)) {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                outcome.skipped += 1;
                tracing::warn!(file = source, line = index + 1, error = %e, "dropping malformed record");
            }
        }
    }
    outcome
}

/// Serialize records as newline-terminated lines
pub fn encode_lines<T: Record>(records: &[T]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_line());
        out.push('\n');
    }
    out
}
