//! Application layer: the store operations callers use.
//!
//! - [`store::ConfigStore`] owns the in-memory mapping, drives lazy loading,
//!   and persists after every mutation.
//! - [`shared::SharedConfigStore`] wraps a store in `Arc<Mutex<_>>` so several
//!   Tokio tasks can use one file without interleaving writes.

pub mod shared;
pub mod store;
