//! Storage infrastructure: where the configuration document physically lives.
//!
//! The store never touches the file system directly.  It talks to a
//! [`StorageBackend`], which answers three questions about a path: does it
//! exist, what text does it hold, and please replace that text.
//!
//! - [`file::FileBackend`] is the production implementation on `tokio::fs`.
//! - [`memory::MemoryBackend`] keeps documents in a shared `HashMap` and can be
//!   told to fail reads or writes, which is how the store's error paths are
//!   tested without a read-only file system.
//!
//! Keeping the trait this small means a new backend (a platform preferences
//! API, an encrypted blob) only has to implement whole-document reads and
//! writes.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Error type for backend operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Checking whether the document exists failed (e.g. permission denied on
    /// the parent directory).
    #[error("failed to probe {path}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// The path the failed operation targeted.
    pub fn path(&self) -> &Path {
        match self {
            StorageError::Probe { path, .. }
            | StorageError::Read { path, .. }
            | StorageError::Write { path, .. } => path,
        }
    }

    /// The underlying I/O error kind.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            StorageError::Probe { source, .. }
            | StorageError::Read { source, .. }
            | StorageError::Write { source, .. } => source.kind(),
        }
    }
}

/// Whole-document storage for a configuration file.
///
/// Implementations must be `Send + Sync` so a store can live inside an
/// `Arc<tokio::sync::Mutex<_>>` and be driven from any Tokio task.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Returns `true` if a document exists at `path`.
    async fn exists(&self, path: &Path) -> Result<bool, StorageError>;

    /// Reads the full text of the document at `path`.
    async fn read_to_string(&self, path: &Path) -> Result<String, StorageError>;

    /// Replaces the document at `path` with `contents`, creating it if needed.
    ///
    /// The parent directory must already exist.
    async fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError>;
}
