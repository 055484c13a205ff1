//! SharedConfigStore: one store, many tasks.
//!
//! A bare [`ConfigStore`] needs `&mut self` for every call.  When several
//! Tokio tasks want the same configuration file, wrap the store here: each
//! operation takes the lock for its whole load / mutate / persist cycle, so two
//! `set` calls can never interleave and lose one another's write.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use super::store::{ConfigStore, StoreError};
use crate::domain::state::LoadState;
use crate::domain::value::ConfigMap;
use crate::infrastructure::storage::{FileBackend, StorageBackend};

/// Cloneable, task-safe handle to a [`ConfigStore`].
#[derive(Debug)]
pub struct SharedConfigStore<B: StorageBackend = FileBackend> {
    inner: Arc<Mutex<ConfigStore<B>>>,
}

// Manual impl: cloning the handle must not require `B: Clone`.
impl<B: StorageBackend> Clone for SharedConfigStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: StorageBackend> From<ConfigStore<B>> for SharedConfigStore<B> {
    fn from(store: ConfigStore<B>) -> Self {
        Self::new(store)
    }
}

impl<B: StorageBackend> SharedConfigStore<B> {
    pub fn new(store: ConfigStore<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.inner.lock().await.get(key, default).await
    }

    pub async fn get_value(&self, key: &str) -> Option<Value> {
        self.inner.lock().await.get_value(key).await
    }

    /// See [`ConfigStore::set`].
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::set`].
    pub async fn set<T: Serialize>(
        &self,
        key: impl Into<String>,
        value: T,
    ) -> Result<(), StoreError> {
        self.inner.lock().await.set(key, value).await
    }

    /// See [`ConfigStore::remove`].
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::remove`].
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.lock().await.remove(key).await
    }

    pub async fn has(&self, key: &str) -> bool {
        self.inner.lock().await.has(key).await
    }

    /// See [`ConfigStore::clear`].
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::clear`].
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.inner.lock().await.clear().await
    }

    pub async fn get_all(&self) -> ConfigMap {
        self.inner.lock().await.get_all().await
    }

    /// See [`ConfigStore::flush`].
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::flush`].
    pub async fn flush(&self) -> Result<(), StoreError> {
        self.inner.lock().await.flush().await
    }

    pub async fn reload(&self) -> LoadState {
        self.inner.lock().await.reload().await.clone()
    }

    pub async fn state(&self) -> LoadState {
        self.inner.lock().await.state().clone()
    }

    pub async fn is_dirty(&self) -> bool {
        self.inner.lock().await.is_dirty()
    }

    /// Reads `key` (or `default`), applies `f`, and stores the result, all
    /// under one lock.  Returns the stored value.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::set`].
    pub async fn update<T, F>(&self, key: &str, default: T, f: F) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: FnOnce(T) -> T,
    {
        let mut store = self.inner.lock().await;
        let next = f(store.get(key, default).await);
        store.set(key, next.clone()).await?;
        Ok(next)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
