//! CLI command handlers for Picklist Viewer.
//!
//! This module provides headless, scriptable access to the plate model for
//! automation and for checking picklists before a run.

pub mod common;
pub mod config;
pub mod hover;
pub mod inspect;
pub mod overrides;
pub mod plates;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use hover::HoverArgs;
pub use inspect::InspectArgs;
pub use overrides::PlateOverrides;
pub use plates::PlatesArgs;
