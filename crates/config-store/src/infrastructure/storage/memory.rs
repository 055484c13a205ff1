//! In-memory backend.
//!
//! Documents live in a `HashMap<PathBuf, String>` behind an `Arc`, so a clone
//! of the backend kept by a test observes every write the store makes.  Reads
//! and writes can be switched to fail with `PermissionDenied` at any time.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{StorageBackend, StorageError};

/// [`StorageBackend`] that keeps documents in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document, as if it already existed on disk.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Creates or replaces a document without counting it as a store write.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files().insert(path.into(), contents.into());
    }

    /// Current text of the document at `path`.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files().get(path.as_ref()).cloned()
    }

    /// Makes subsequent reads fail (`true`) or succeed (`false`).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent writes fail (`true`) or succeed (`false`).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful [`StorageBackend::write`] calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn files(&self) -> MutexGuard<'_, HashMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn injected_failure() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "injected failure")
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn exists(&self, path: &Path) -> Result<bool, StorageError> {
        Ok(self.files().contains_key(path))
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source: injected_failure(),
            });
        }
        self.files()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::Read {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                path: path.to_path_buf(),
                source: injected_failure(),
            });
        }
        self.files().insert(path.to_path_buf(), contents.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
