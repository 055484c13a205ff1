//! Load lifecycle of a [`ConfigStore`](crate::ConfigStore).
//!
//! ```text
//! Uninitialized ──► Ready
//!       │             ▲
//!       ▼             │  successful load or persist
//!    Failed ──────────┘
//! ```
//!
//! `Failed` is not terminal: the store retries the load on the next access,
//! so a file repaired on disk is picked up without restarting the process.

use std::fmt;

/// Where a store is in its load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No load has been attempted yet.
    #[default]
    Uninitialized,
    /// The in-memory mapping matches the file (or the file was just created).
    Ready,
    /// The last load attempt failed; the store is serving an empty mapping.
    Failed {
        /// Human-readable cause, e.g. the JSON syntax error.
        reason: String,
    },
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed { .. })
    }

    /// The failure reason, if the last load failed.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            LoadState::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// `true` if this is a failure with exactly `reason`.
    pub fn is_same_failure(&self, reason: &str) -> bool {
        self.failure_reason() == Some(reason)
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Uninitialized => f.write_str("uninitialized"),
            LoadState::Ready => f.write_str("ready"),
            LoadState::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}
