//! # config-store
//!
//! A key-value configuration store persisted as a single JSON file.
//!
//! An application uses this crate to save and retrieve small pieces of
//! settings data (flags, strings, numbers, nested objects) without standing
//! up a database.  The store lazily creates or loads its backing file on first
//! use, keeps the whole mapping in memory, and writes the full mapping back to
//! disk after every mutation.
//!
//! # Architecture overview
//!
//! ```text
//! caller
//!   │
//!   ├── application/
//!   │     ├── ConfigStore        get / set / remove / has / clear / get_all
//!   │     └── SharedConfigStore  Arc<Mutex<ConfigStore>> for many tasks
//!   ├── domain/
//!   │     ├── ConfigMap          ordered string → JSON value mapping
//!   │     ├── LoadState          Uninitialized / Ready / Failed
//!   │     └── StoreOptions       file name, write strategy, indentation
//!   └── infrastructure/storage/
//!         ├── StorageBackend     async trait: exists / read / write
//!         ├── FileBackend        tokio::fs, overwrite or temp-file + rename
//!         └── MemoryBackend      in-process files, failure injection
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use config_store::ConfigStore;
//!
//! # async fn demo() -> Result<(), config_store::StoreError> {
//! let mut store = ConfigStore::open("/var/lib/myapp");
//! store.set("theme", "dark").await?;
//! let theme: String = store.get("theme", "light".to_string()).await;
//! assert_eq!(theme, "dark");
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the most-used types at the crate root so callers can write
// `config_store::ConfigStore` instead of `config_store::application::store::ConfigStore`.
pub use application::shared::SharedConfigStore;
pub use application::store::{ConfigStore, StoreError};
pub use domain::options::{OptionsError, StoreOptions, WriteStrategy, DEFAULT_FILE_NAME};
pub use domain::state::LoadState;
pub use domain::value::ConfigMap;
pub use infrastructure::storage::{FileBackend, MemoryBackend, StorageBackend, StorageError};

/// Re-exported so callers can build and match stored values without adding
/// `serde_json` themselves.
pub use serde_json::Value;
