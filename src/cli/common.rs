//! Shared error type and helpers for CLI commands.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::models::{PlateError, PlateSide};
use crate::parser::{load_picklist, LoadedPicklist};
use crate::services::PicklistSession;

/// Process exit codes used by headless commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was readable but failed a check (bad value, overfull wells in strict mode)
    Validation = 1,
    /// A file could not be read, parsed or written
    Io = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process should terminate with
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O or parse failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Io,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration, failing with exit code 2 on a broken file.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

/// Loads a picklist, failing with exit code 2.
pub fn load_picklist_file(path: &Path) -> CliResult<LoadedPicklist> {
    load_picklist(path).map_err(|e| CliError::io(format!("{e:#}")))
}

/// Builds a session over a loaded picklist and applies the requested plates.
///
/// Unknown plate names fail with exit code 1.
pub fn open_session(
    picklist: &LoadedPicklist,
    config: &Config,
    source_plate: Option<&str>,
    dest_plate: Option<&str>,
) -> CliResult<PicklistSession> {
    let mut session = PicklistSession::new(config.plates, config.ceilings);
    session.load(picklist.table.clone());

    for (side, name) in [
        (PlateSide::Source, source_plate),
        (PlateSide::Destination, dest_plate),
    ] {
        if let Some(name) = name {
            session.select_plate(side, name).map_err(|e| match e {
                PlateError::NoPlateSelected => CliError::validation(format!(
                    "{} plate '{name}' not found in picklist",
                    side.label()
                )),
                other => CliError::validation(other.to_string()),
            })?;
        }
    }

    Ok(session)
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("x").exit_code.code(), 1);
        assert_eq!(CliError::io("x").exit_code.code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_load_missing_picklist_is_io_error() {
        let err = load_picklist_file(Path::new("/nonexistent/picklist.csv")).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::Io);
        assert!(err.message.contains("Failed to open picklist"));
    }
}
