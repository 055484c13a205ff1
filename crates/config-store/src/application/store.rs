//! ConfigStore: a JSON-file-backed key-value store.
//!
//! # Lifecycle
//!
//! Construction does no I/O.  The first operation loads the file:
//!
//! - file exists, non-empty: parse it as a JSON object.
//! - file exists, empty: start with an empty mapping.
//! - file absent: start empty and write `{}` immediately.
//! - read or parse failure: log it, serve an empty mapping, and record
//!   [`LoadState::Failed`].  The load is retried on the next operation, and the
//!   corrupt file is left alone until a successful write replaces it.
//!
//! # Persistence
//!
//! Every mutation (`set`, `remove`, `clear`) serializes the whole mapping and
//! writes it through the [`StorageBackend`].  A failed write keeps the mutation
//! in memory, marks the store dirty, and returns [`StoreError::Persist`];
//! [`ConfigStore::flush`] retries.  While dirty, the in-memory mapping is
//! authoritative and no reload is attempted.
//!
//! # Null values
//!
//! [`ConfigStore::get`] treats a stored `null` as absent and returns the
//! default.  [`ConfigStore::get_value`] and [`ConfigStore::has`] see the
//! explicit `null`.
//!
//! # Concurrency
//!
//! Every operation takes `&mut self`, so one instance cannot run two
//! read-modify-persist cycles at once.  Use
//! [`SharedConfigStore`](crate::SharedConfigStore) to share a store between
//! tasks.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::options::StoreOptions;
use crate::domain::state::LoadState;
use crate::domain::value::{self, ConfigMap, DEFAULT_INDENT};
use crate::infrastructure::storage::{FileBackend, StorageBackend, StorageError};

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The mutation was applied in memory but could not be written.
    #[error("failed to persist configuration to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: StorageError,
    },

    /// The backing file could not be probed or read.
    #[error("failed to load configuration from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: StorageError,
    },

    /// The backing file is not a JSON object.
    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value (or the mapping) could not be converted to JSON.
    #[error("failed to serialize configuration value: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Outcome of reading the backing file.
enum Loaded {
    Existing(ConfigMap),
    Missing,
}

/// Key-value configuration store persisted as one JSON file.
#[derive(Debug)]
pub struct ConfigStore<B: StorageBackend = FileBackend> {
    path: PathBuf,
    backend: B,
    indent: usize,
    data: ConfigMap,
    state: LoadState,
    dirty: bool,
}

impl ConfigStore<FileBackend> {
    /// Store at `<base_dir>/AppConfig.json` with default options.
    ///
    /// `base_dir` must already exist; the store never creates directories.
    pub fn open(base_dir: impl AsRef<Path>) -> Self {
        Self::with_options(base_dir, StoreOptions::default())
    }

    /// Store at `<base_dir>/<options.file_name>`.
    pub fn with_options(base_dir: impl AsRef<Path>, options: StoreOptions) -> Self {
        let path = base_dir.as_ref().join(&options.file_name);
        Self::with_backend(path, FileBackend::new(options.write_strategy))
            .with_indent(options.indent)
    }
}

impl<B: StorageBackend> ConfigStore<B> {
    /// Store at the exact `path`, reading and writing through `backend`.
    pub fn with_backend(path: impl Into<PathBuf>, backend: B) -> Self {
        Self {
            path: path.into(),
            backend,
            indent: DEFAULT_INDENT,
            data: ConfigMap::new(),
            state: LoadState::Uninitialized,
            dirty: false,
        }
    }

    /// Sets the number of spaces per indentation level in the written file.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current load state.  Does not trigger a load.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// `true` when the in-memory mapping holds changes the file does not.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ── Public operations ─────────────────────────────────────────────────────

    /// Returns the value stored under `key`, or `default` when the key is
    /// absent, holds `null`, or holds a value that does not deserialize as `T`.
    pub async fn get<T: DeserializeOwned>(&mut self, key: &str, default: T) -> T {
        self.ensure_loaded().await;
        match value::lookup(&self.data, key) {
            None => default,
            Some(stored) => match <T as Deserialize>::deserialize(stored) {
                Ok(v) => v,
                Err(e) => {
                    warn!(
                        key,
                        error = %e,
                        "stored configuration value has unexpected type; using default"
                    );
                    default
                }
            },
        }
    }

    /// Returns the raw stored value, including an explicit `null`.
    pub async fn get_value(&mut self, key: &str) -> Option<Value> {
        self.ensure_loaded().await;
        self.data.get(key).cloned()
    }

    /// Stores `value` under `key` and persists the mapping.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Serialize`] if `value` cannot be represented as JSON;
    ///   the mapping is unchanged.
    /// - [`StoreError::Persist`] if the write fails; the new value is kept in
    ///   memory and the store is marked dirty.
    pub async fn set<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: T,
    ) -> Result<(), StoreError> {
        self.ensure_loaded().await;
        let value = serde_json::to_value(value).map_err(StoreError::Serialize)?;
        self.data.insert(key.into(), value);
        self.persist().await
    }

    /// Deletes `key` (if present) and persists the mapping.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persist`] if the write fails; the key stays removed in
    /// memory.
    pub async fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.ensure_loaded().await;
        self.data.shift_remove(key);
        self.persist().await
    }

    /// `true` if `key` is present, even when its value is `null`.
    pub async fn has(&mut self, key: &str) -> bool {
        self.ensure_loaded().await;
        self.data.contains_key(key)
    }

    /// Removes every key and persists the empty mapping.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persist`] if the write fails.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.ensure_loaded().await;
        self.data.clear();
        self.persist().await
    }

    /// Snapshot of the whole mapping, in insertion order.
    pub async fn get_all(&mut self) -> ConfigMap {
        self.ensure_loaded().await;
        self.data.clone()
    }

    pub async fn len(&mut self) -> usize {
        self.ensure_loaded().await;
        self.data.len()
    }

    pub async fn is_empty(&mut self) -> bool {
        self.len().await == 0
    }

    /// Writes the mapping if an earlier persist failed.  No-op when clean.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persist`] if the write fails again.
    pub async fn flush(&mut self) -> Result<(), StoreError> {
        self.ensure_loaded().await;
        if !self.dirty {
            return Ok(());
        }
        self.persist().await
    }

    /// Drops the in-memory mapping (including unflushed changes) and loads the
    /// file again.
    pub async fn reload(&mut self) -> &LoadState {
        self.data.clear();
        self.dirty = false;
        self.state = LoadState::Uninitialized;
        self.ensure_loaded().await;
        &self.state
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    async fn ensure_loaded(&mut self) {
        if self.state.is_ready() || self.dirty {
            return;
        }

        match self.load().await {
            Ok(Loaded::Existing(data)) => {
                debug!(path = %self.path.display(), entries = data.len(), "configuration loaded");
                self.data = data;
                self.state = LoadState::Ready;
            }
            Ok(Loaded::Missing) => {
                debug!(path = %self.path.display(), "configuration file absent; creating it");
                self.data = ConfigMap::new();
                self.state = LoadState::Ready;
                // Failure is logged inside persist and leaves the store dirty.
                let _ = self.persist().await;
            }
            Err(e) => {
                let reason = e.to_string();
                if self.state.is_same_failure(&reason) {
                    debug!(
                        path = %self.path.display(),
                        error = %e,
                        "configuration still unreadable"
                    );
                } else {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "configuration load failed; using empty configuration"
                    );
                }
                self.data = ConfigMap::new();
                self.state = LoadState::Failed { reason };
            }
        }
    }

    async fn load(&self) -> Result<Loaded, StoreError> {
        let exists = self
            .backend
            .exists(&self.path)
            .await
            .map_err(|source| StoreError::Load {
                path: self.path.clone(),
                source,
            })?;
        if !exists {
            return Ok(Loaded::Missing);
        }

        let text = self
            .backend
            .read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Load {
                path: self.path.clone(),
                source,
            })?;
        let data = value::parse_document(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Loaded::Existing(data))
    }

    async fn persist(&mut self) -> Result<(), StoreError> {
        self.dirty = true;
        let contents =
            value::render_document(&self.data, self.indent).map_err(StoreError::Serialize)?;

        match self.backend.write(&self.path, &contents).await {
            Ok(()) => {
                self.dirty = false;
                self.state = LoadState::Ready;
                debug!(
                    path = %self.path.display(),
                    entries = self.data.len(),
                    "configuration persisted"
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    path = %self.path.display(),
                    error = %source,
                    "failed to persist configuration"
                );
                Err(StoreError::Persist {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
