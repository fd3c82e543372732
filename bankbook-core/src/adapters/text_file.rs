//! Text file record store
//!
//! One file per entity kind inside the data directory, one record per
//! line. Saves go through a temp file in the same directory followed by a
//! rename, so a crash mid-write leaves the previous file intact.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::Record;
use crate::ports::{decode_lines, encode_lines, LoadOutcome, RecordStore, StoreError, StoreResult};

/// Lock file guarding the data directory against a second process
const LOCK_FILE: &str = ".bankbook.lock";

/// Record store over a directory of text files
#[derive(Debug)]
pub struct TextFileStore {
    data_dir: PathBuf,
    // Held for the lifetime of the store; the OS releases the lock on drop
    _lock: File,
}

impl TextFileStore {
    /// Open (and create if needed) the data directory.
    ///
    /// Takes an exclusive advisory lock; fails with [`StoreError::Locked`]
    /// if another process already holds it.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(data_dir)?;

        let lock_path = data_dir.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)?;
        lock.try_lock_exclusive()
            .map_err(|_| StoreError::Locked(data_dir.to_path_buf()))?;

        tracing::debug!(dir = %data_dir.display(), "opened record store");

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            _lock: lock,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for<T: Record>(&self) -> PathBuf {
        self.data_dir.join(T::FILE_NAME)
    }
}

impl RecordStore for TextFileStore {
    fn load<T: Record>(&self) -> StoreResult<LoadOutcome<T>> {
        let path = self.path_for::<T>();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadOutcome::empty()),
            Err(e) => return Err(e.into()),
        };

        let outcome = decode_lines(T::FILE_NAME, content.lines());
        tracing::debug!(
            file = T::FILE_NAME,
            loaded = outcome.records.len(),
            skipped = outcome.skipped,
            "loaded records"
        );
        Ok(outcome)
    }

    fn save<T: Record>(&self, records: &[T]) -> StoreResult<()> {
        let path = self.path_for::<T>();
        let mut temp = NamedTempFile::new_in(&self.data_dir)?;
        temp.write_all(encode_lines(records).as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = TextFileStore::open(dir.path()).unwrap();
        let outcome = store.load::<User>().unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let dir = TempDir::new().unwrap();
        let store = TextFileStore::open(dir.path()).unwrap();

        store
            .save(&[User::new("alice", "d1", "s1"), User::new("bob", "d2", "s2")])
            .unwrap();
        store.save(&[User::new("carol", "d3", "s3")]).unwrap();

        let content = fs::read_to_string(dir.path().join("users.txt")).unwrap();
        assert_eq!(content, "carol,d3,s3,true\n");
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = TextFileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.data_dir(), nested.as_path());
    }

    #[test]
    fn test_second_open_is_locked() {
        let dir = TempDir::new().unwrap();
        let _first = TextFileStore::open(dir.path()).unwrap();
        assert!(matches!(
            TextFileStore::open(dir.path()),
            Err(StoreError::Locked(_))
        ));
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = TempDir::new().unwrap();
        drop(TextFileStore::open(dir.path()).unwrap());
        assert!(TextFileStore::open(dir.path()).is_ok());
    }
}
