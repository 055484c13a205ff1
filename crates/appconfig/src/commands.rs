//! Subcommands and their execution against a [`ConfigStore`].
//!
//! Values given on the command line are parsed as JSON when possible, so
//! `set count 5` stores the number `5` and `set enabled true` stores a
//! boolean.  Text that is not valid JSON is stored as a string, which means
//! `set theme dark` works without shell-quoting `"dark"`.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Subcommand;
use config_store::{ConfigStore, StorageBackend, StoreOptions, Value};
use tracing::debug;

/// One operation on the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the value stored under KEY.
    ///
    /// Exits with status 1 when the key is absent (or null) and no default
    /// was given.
    Get {
        key: String,
        /// Value to print when KEY is absent, parsed like `set` values.
        #[arg(long)]
        default: Option<String>,
    },
    /// Store VALUE under KEY.
    Set { key: String, value: String },
    /// Delete KEY.
    Remove { key: String },
    /// Exit with status 0 if KEY exists, 1 otherwise.
    Has { key: String },
    /// Delete every key.
    Clear,
    /// Print the whole configuration as pretty JSON.
    List,
    /// Print the path of the configuration file.
    Path,
}

/// Result of a command that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The queried key does not exist.
    NotFound,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::NotFound => ExitCode::from(1),
        }
    }
}

/// Parses a command-line value: JSON if it parses, otherwise a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Formats a value for printing: strings bare, everything else as JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds [`StoreOptions`] from an optional TOML file and an optional file
/// name override.  The override wins over the file.
///
/// # Errors
///
/// Returns an error if the options file cannot be read or parsed.
pub async fn load_options(
    options_file: Option<&Path>,
    file_name: Option<&str>,
) -> anyhow::Result<StoreOptions> {
    let mut options = match options_file {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read options file {}", path.display()))?;
            StoreOptions::from_toml_str(&text)
                .with_context(|| format!("invalid options file {}", path.display()))?
        }
        None => StoreOptions::default(),
    };
    if let Some(name) = file_name {
        options.file_name = name.to_string();
    }
    Ok(options)
}

/// Runs `command` against `store`, writing any output to `out`.
///
/// # Errors
///
/// Returns an error if a mutation could not be persisted or output could not
/// be written.  Reads never fail.
pub async fn execute<B: StorageBackend>(
    store: &mut ConfigStore<B>,
    command: &Command,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    debug!(?command, path = %store.path().display(), "executing command");

    match command {
        Command::Get { key, default } => {
            let found = match default {
                Some(default) => Some(store.get(key, parse_value(default)).await),
                None => store.get_value(key).await.filter(|v| !v.is_null()),
            };
            match found {
                Some(value) => {
                    writeln!(out, "{}", render_value(&value))?;
                    Ok(Outcome::Success)
                }
                None => Ok(Outcome::NotFound),
            }
        }
        Command::Set { key, value } => {
            store
                .set(key.as_str(), parse_value(value))
                .await
                .with_context(|| format!("failed to set '{key}'"))?;
            Ok(Outcome::Success)
        }
        Command::Remove { key } => {
            store
                .remove(key)
                .await
                .with_context(|| format!("failed to remove '{key}'"))?;
            Ok(Outcome::Success)
        }
        Command::Has { key } => {
            let present = store.has(key).await;
            writeln!(out, "{present}")?;
            Ok(if present {
                Outcome::Success
            } else {
                Outcome::NotFound
            })
        }
        Command::Clear => {
            store.clear().await.context("failed to clear configuration")?;
            Ok(Outcome::Success)
        }
        Command::List => {
            let all = Value::Object(store.get_all().await);
            writeln!(out, "{}", serde_json::to_string_pretty(&all)?)?;
            Ok(Outcome::Success)
        }
        Command::Path => {
            writeln!(out, "{}", store.path().display())?;
            Ok(Outcome::Success)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
