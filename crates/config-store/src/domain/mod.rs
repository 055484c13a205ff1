//! Domain types for the configuration store.
//!
//! Everything here is pure: no file system access, no async, no logging.
//! The application layer owns the I/O and drives these types.
//!
//! - [`value`]: the in-memory mapping and the JSON document codec.
//! - [`state`]: the load lifecycle of a store.
//! - [`options`]: per-store settings with serde defaults.

pub mod options;
pub mod state;
pub mod value;

pub use options::{OptionsError, StoreOptions, WriteStrategy, DEFAULT_FILE_NAME};
pub use state::LoadState;
pub use value::ConfigMap;
