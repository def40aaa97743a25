//! Inspect a picklist: well usage per plate, overfull wells, estimates.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{
    load_config, load_picklist_file, open_session, print_json, CliError, CliResult,
};
use crate::cli::overrides::PlateOverrides;
use crate::models::PlateSide;
use crate::parser::SkippedRow;
use crate::services::plate_grid::OffGridWell;
use crate::services::{PlateGrid, PlateView, TransferEstimate, WellState};

/// Summarize well usage for a plate pair
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to picklist CSV file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Source plate to inspect (defaults to the first one in the file)
    #[arg(long, value_name = "NAME")]
    pub source_plate: Option<String>,

    /// Destination plate to inspect (defaults to the first one in the file)
    #[arg(long, value_name = "NAME")]
    pub dest_plate: Option<String>,

    #[command(flatten)]
    pub plates: PlateOverrides,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit non-zero when any well is overfull
    #[arg(long)]
    pub strict: bool,
}

#[derive(Serialize, Debug)]
struct InspectReport {
    file: String,
    records: usize,
    dropped_zero_volume: usize,
    skipped_rows: Vec<SkippedRow>,
    plates: Vec<PlateReport>,
    estimates: EstimateReport,
}

#[derive(Serialize, Debug)]
struct PlateReport {
    side: PlateSide,
    plate: String,
    rows: usize,
    cols: usize,
    ceiling_nl: f64,
    used_wells: usize,
    overfull_wells: usize,
    overfull: Vec<WellVolume>,
    off_grid: Vec<OffGridWell>,
}

#[derive(Serialize, Debug)]
struct WellVolume {
    well: String,
    volume_nl: u64,
}

#[derive(Serialize, Debug)]
struct EstimateReport {
    total_seconds: u64,
    total: String,
    current_pair_seconds: u64,
    current_pair: String,
}

impl From<(TransferEstimate, TransferEstimate)> for EstimateReport {
    fn from((total, current_pair): (TransferEstimate, TransferEstimate)) -> Self {
        Self {
            total_seconds: total.seconds,
            total: total.to_string(),
            current_pair_seconds: current_pair.seconds,
            current_pair: current_pair.to_string(),
        }
    }
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let config = self.plates.resolve(load_config()?)?;
        let picklist = load_picklist_file(&self.file)?;
        let session = open_session(
            &picklist,
            &config,
            self.source_plate.as_deref(),
            self.dest_plate.as_deref(),
        )?;

        let grids = match session
            .view()
            .map_err(|e| CliError::validation(e.to_string()))?
        {
            PlateView::Ready(grids) => grids,
            PlateView::NoData(reason) => {
                return Err(CliError::validation(format!(
                    "{}: {reason}",
                    self.file.display()
                )))
            }
        };
        let selection = session
            .selection()
            .ok_or_else(|| CliError::validation("No plate pair selected"))?;

        let estimates = session.estimates();
        let report = InspectReport {
            file: self.file.display().to_string(),
            records: picklist.table.len(),
            dropped_zero_volume: picklist.table.dropped_zero_volume(),
            skipped_rows: picklist.skipped.clone(),
            plates: vec![
                plate_report(&grids.source, selection.plate(PlateSide::Source))?,
                plate_report(&grids.dest, selection.plate(PlateSide::Destination))?,
            ],
            estimates: (estimates.total, estimates.current_pair).into(),
        };

        if self.json {
            print_json(&report)?;
        } else {
            print_human_readable(&report);
        }

        let overfull: usize = report.plates.iter().map(|p| p.overfull_wells).sum();
        if self.strict && overfull > 0 {
            return Err(CliError::validation(format!(
                "{overfull} overfull well(s) found in strict mode"
            )));
        }
        Ok(())
    }
}

fn plate_report(grid: &PlateGrid, plate: &str) -> CliResult<PlateReport> {
    let overfull = grid
        .iter()
        .filter(|(_, state, _)| *state == WellState::Overfull)
        .map(|(coord, _, volume_nl)| {
            coord
                .name()
                .map(|well| WellVolume { well, volume_nl })
                .map_err(|e| CliError::validation(e.to_string()))
        })
        .collect::<CliResult<Vec<_>>>()?;

    Ok(PlateReport {
        side: grid.side(),
        plate: plate.to_string(),
        rows: grid.rows(),
        cols: grid.cols(),
        ceiling_nl: grid.ceiling_nl(),
        used_wells: grid.count(WellState::Used),
        overfull_wells: grid.count(WellState::Overfull),
        overfull,
        off_grid: grid.off_grid_wells().to_vec(),
    })
}

fn print_human_readable(report: &InspectReport) {
    println!("Picklist: {}", report.file);
    println!(
        "  Transfers: {} ({} dropped at zero volume, {} rows skipped)",
        report.records,
        report.dropped_zero_volume,
        report.skipped_rows.len()
    );

    for plate in &report.plates {
        println!();
        println!(
            "{} plate {} ({}x{}, ceiling {:.1} nl):",
            plate.side, plate.plate, plate.rows, plate.cols, plate.ceiling_nl
        );
        println!("  Used wells:     {}", plate.used_wells);
        println!("  Overfull wells: {}", plate.overfull_wells);
        for well in &plate.overfull {
            println!("    ✗ {} - {} nl", well.well, well.volume_nl);
        }
        for well in &plate.off_grid {
            println!("    ⚠ {} - {} ({} nl)", well.well, well.reason, well.volume_nl);
        }
    }

    if !report.skipped_rows.is_empty() {
        println!();
        println!("Skipped rows:");
        for row in &report.skipped_rows {
            println!("  line {}: {}", row.line, row.reason);
        }
    }

    println!();
    println!("Estimated time:");
    println!("  All transfers: {}", report.estimates.total);
    println!("  Plate pair:    {}", report.estimates.current_pair);
}
