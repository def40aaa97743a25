//! Parsing for picklist files.
//!
//! Picklists are CSV exports from the liquid-handler software; this module
//! turns them into a validated [`crate::services::TransferTable`].

pub mod picklist_csv;

// Re-export commonly used functions
pub use picklist_csv::{load_picklist, parse_picklist, LoadedPicklist, SkippedRow};
