//! List the plates named in a picklist.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{load_picklist_file, print_json, CliError, CliResult};
use crate::models::PlateSide;

/// List source and destination plate names in first-seen order
#[derive(Debug, Clone, Args)]
pub struct PlatesArgs {
    /// Path to picklist CSV file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct PlatesOutput {
    source: Vec<String>,
    destination: Vec<String>,
}

impl PlatesArgs {
    /// Execute the plates command
    pub fn execute(&self) -> CliResult<()> {
        let picklist = load_picklist_file(&self.file)?;

        let names = |side| {
            picklist
                .table
                .unique_plate_names(side)
                .map_err(|e| CliError::validation(format!("{}: {e}", self.file.display())))
        };
        let output = PlatesOutput {
            source: names(PlateSide::Source)?,
            destination: names(PlateSide::Destination)?,
        };

        if self.json {
            return print_json(&output);
        }

        println!("Source plates:");
        for name in &output.source {
            println!("  {name}");
        }
        println!("Destination plates:");
        for name in &output.destination {
            println!("  {name}");
        }
        Ok(())
    }
}
