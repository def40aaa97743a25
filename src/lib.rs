//! Picklist Viewer Library
//!
//! This library loads liquid-handler picklists, aggregates the transferred
//! volume per well and classifies every well of a source and destination
//! microplate against configurable ceilings. It also resolves the hover
//! details (transfer summary and related wells) the terminal UI shows.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod logging;
pub mod models;
pub mod parser;
pub mod services;
pub mod shortcuts;
pub mod tui;
