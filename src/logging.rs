//! Tracing subscriber setup.
//!
//! Headless commands log to stderr. The TUI owns the terminal, so it only logs
//! when a log file is given.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn filter(default: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Logs to stderr, `warn` and above unless `verbose` or `RUST_LOG` says otherwise.
pub fn init_stderr(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(filter(default))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Appends logs to `path`, `info` and above unless `verbose` or `RUST_LOG` says otherwise.
pub fn init_file(path: &Path, verbose: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(filter(default))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}
