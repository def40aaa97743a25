//! Show what hovering a well would display.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{
    load_config, load_picklist_file, open_session, print_json, CliError, CliResult,
};
use crate::models::{name_to_coord, PlateSide};

/// Print the transfer summary and related wells for one well
#[derive(Debug, Clone, Args)]
pub struct HoverArgs {
    /// Path to picklist CSV file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Well name (e.g. A1, AB12)
    #[arg(short, long, value_name = "WELL")]
    pub well: String,

    /// Plate side of the well (source or destination)
    #[arg(short, long, value_name = "SIDE", default_value = "source")]
    pub side: PlateSide,

    /// Source plate of the pair (defaults to the first one in the file)
    #[arg(long, value_name = "NAME")]
    pub source_plate: Option<String>,

    /// Destination plate of the pair (defaults to the first one in the file)
    #[arg(long, value_name = "NAME")]
    pub dest_plate: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HoverArgs {
    /// Execute the hover command
    pub fn execute(&self) -> CliResult<()> {
        name_to_coord(&self.well).map_err(|e| CliError::validation(e.to_string()))?;

        let config = load_config()?;
        let picklist = load_picklist_file(&self.file)?;
        let session = open_session(
            &picklist,
            &config,
            self.source_plate.as_deref(),
            self.dest_plate.as_deref(),
        )?;

        let result = session.hover(&self.well, self.side).ok_or_else(|| {
            CliError::validation(format!("{}: no transfers loaded", self.file.display()))
        })?;

        if self.json {
            return print_json(&result);
        }

        let plate = session
            .selection()
            .map_or("", |selection| selection.plate(self.side));
        println!("{} well {} on {plate}", result.side, result.well);
        println!("{}", result.summary_text());
        if !result.related_wells.is_empty() {
            let related: Vec<&str> = result.related_wells.iter().map(|r| r.well.as_str()).collect();
            println!(
                "Related {} wells: {}",
                self.side.opposite().label().to_lowercase(),
                related.join(", ")
            );
        }
        Ok(())
    }
}
