//! Infrastructure layer for the configuration store.
//!
//! Contains the OS-facing adapters: the file-system backend and an in-memory
//! stand-in with the same interface.
//!
//! **Dependency rule**: this layer may depend on `domain`, but MUST NOT be
//! imported by the `domain` layer.

pub mod storage;
