//! appconfig: inspect and edit a JSON configuration file from the shell.
//!
//! # Usage
//!
//! ```text
//! appconfig [OPTIONS] <COMMAND>
//!
//! Commands:
//!   get     Print the value stored under KEY
//!   set     Store VALUE under KEY
//!   remove  Delete KEY
//!   has     Exit with status 0 if KEY exists, 1 otherwise
//!   clear   Delete every key
//!   list    Print the whole configuration as pretty JSON
//!   path    Print the path of the configuration file
//!
//! Options:
//!   --dir <DIR>        Directory holding the file [env: APPCONFIG_DIR] [default: .]
//!   --file <NAME>      File name [env: APPCONFIG_FILE] [default: AppConfig.json]
//!   --options <FILE>   TOML file with store options
//! ```
//!
//! Command output goes to stdout; logs go to stderr and default to `warn`.
//! Set `RUST_LOG=debug` to see every load and persist.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use appconfig::{execute, load_options, Command};
use config_store::ConfigStore;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit a JSON key-value configuration file.
#[derive(Debug, Parser)]
#[command(name = "appconfig", version)]
struct Cli {
    /// Directory holding the configuration file.  Must already exist.
    #[arg(long, default_value = ".", env = "APPCONFIG_DIR")]
    dir: PathBuf,

    /// Configuration file name inside `--dir`.  Overrides the options file.
    #[arg(long, env = "APPCONFIG_FILE")]
    file: Option<String>,

    /// TOML file with store options (file_name, write_strategy, indent).
    #[arg(long)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so `appconfig get` output can be piped.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let options = load_options(cli.options.as_deref(), cli.file.as_deref()).await?;
    let mut store = ConfigStore::with_options(&cli.dir, options);
    info!(path = %store.path().display(), "using configuration file");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = execute(&mut store, &cli.command, &mut out).await?;
    out.flush().context("failed to flush stdout")?;

    Ok(outcome.into())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
