//! File-system backend built on `tokio::fs`.
//!
//! Writes follow the configured [`WriteStrategy`]:
//!
//! - `AtomicRename` writes `.<name>.<uuid>.tmp` next to the target, syncs it,
//!   and renames it over the target.  Readers see either the old document or
//!   the new one, never a truncated file.  The temp file is removed if any
//!   step fails.  A symlinked target is resolved first so the link survives
//!   and the real file is replaced, and the existing file's permissions are
//!   copied onto the replacement.
//! - `Overwrite` truncates the target and writes in place.
//!
//! The backend never creates directories.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{StorageBackend, StorageError};
use crate::domain::options::WriteStrategy;

/// [`StorageBackend`] over the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileBackend {
    strategy: WriteStrategy,
}

impl FileBackend {
    pub fn new(strategy: WriteStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> WriteStrategy {
        self.strategy
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn exists(&self, path: &Path) -> Result<bool, StorageError> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|source| StorageError::Probe {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        let result = match self.strategy {
            WriteStrategy::AtomicRename => write_atomic(path, contents).await,
            WriteStrategy::Overwrite => tokio::fs::write(path, contents).await,
        };
        result.map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Sibling temp path for `path`, unique per call.
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string());
    path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()))
}

/// Resolves symlinks in `path`.  A target that does not exist yet is written
/// where it was asked for.
async fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match tokio::fs::canonicalize(path).await {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

async fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let target = resolve_target(path).await?;
    let tmp = temp_path_for(&target);

    let result = async {
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;
        match tokio::fs::metadata(&target).await {
            Ok(meta) => tokio::fs::set_permissions(&tmp, meta.permissions()).await?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, &target).await
    }
    .await;

    match &result {
        Ok(()) => debug!(path = %target.display(), "renamed temp file over target"),
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!(tmp = %tmp.display(), error = %cleanup, "could not remove temp file");
                }
            }
            debug!(path = %target.display(), error = %e, "atomic write failed");
        }
    }
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────
