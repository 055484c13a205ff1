//! appconfig library crate.
//!
//! The binary in `main.rs` only parses arguments, installs logging, and hands
//! a [`Command`](commands::Command) to [`execute`](commands::execute).  Keeping
//! the command logic here lets the integration tests in `tests/` run every
//! subcommand against a real store without spawning a process.

pub mod commands;

pub use commands::{execute, load_options, parse_value, render_value, Command, Outcome};
