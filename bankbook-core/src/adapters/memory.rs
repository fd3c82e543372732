//! In-memory record store
//!
//! Keeps the encoded lines per file name, so loads exercise the same codec
//! as the text file store. Saves can be switched to fail to simulate a
//! full or read-only disk.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::Record;
use crate::ports::{decode_lines, encode_lines, LoadOutcome, RecordStore, StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<&'static str, String>>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the raw content of a file
    pub fn with_content(self, file_name: &'static str, content: impl Into<String>) -> Self {
        self.lock_files().insert(file_name, content.into());
        self
    }

    /// Raw content last saved for `T`
    pub fn content<T: Record>(&self) -> Option<String> {
        self.lock_files().get(T::FILE_NAME).cloned()
    }

    /// Make every subsequent save fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    fn lock_files(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, String>> {
        // A panic while holding the lock cannot leave the map half-written
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStore for MemoryStore {
    fn load<T: Record>(&self) -> StoreResult<LoadOutcome<T>> {
        let files = self.lock_files();
        Ok(match files.get(T::FILE_NAME) {
            Some(content) => decode_lines(T::FILE_NAME, content.lines()),
            None => LoadOutcome::empty(),
        })
    }

    fn save<T: Record>(&self, records: &[T]) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "simulated write failure for {}",
                T::FILE_NAME
            )));
        }
        self.lock_files().insert(T::FILE_NAME, encode_lines(records));
        Ok(())
    }
}
