//! Picklist CSV loading.
//!
//! Reads Echo-style picklists with the columns `Source Plate Name` (optional),
//! `Source Well`, `Destination Plate Name` (optional), `Destination Well` and
//! `Transfer Volume`. Other columns are ignored.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::models::{name_to_coord, RawTransfer};
use crate::services::TransferTable;

/// Column holding the source plate name.
pub const SOURCE_PLATE_COLUMN: &str = "Source Plate Name";
/// Column holding the source well.
pub const SOURCE_WELL_COLUMN: &str = "Source Well";
/// Column holding the destination plate name.
pub const DEST_PLATE_COLUMN: &str = "Destination Plate Name";
/// Column holding the destination well.
pub const DEST_WELL_COLUMN: &str = "Destination Well";
/// Column holding the transfer volume in nanoliters.
pub const VOLUME_COLUMN: &str = "Transfer Volume";

const REQUIRED_COLUMNS: [&str; 3] = [SOURCE_WELL_COLUMN, DEST_WELL_COLUMN, VOLUME_COLUMN];

#[derive(Debug, Deserialize)]
struct PicklistRow {
    #[serde(rename = "Source Plate Name", default)]
    source_plate: Option<String>,
    #[serde(rename = "Source Well")]
    source_well: String,
    #[serde(rename = "Destination Plate Name", default)]
    dest_plate: Option<String>,
    #[serde(rename = "Destination Well")]
    dest_well: String,
    #[serde(rename = "Transfer Volume")]
    volume: String,
}

/// A picklist row that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the file
    pub line: u64,
    /// Why the row was skipped
    pub reason: String,
}

/// A parsed picklist.
#[derive(Debug, Clone, Default)]
pub struct LoadedPicklist {
    /// File the picklist came from, if any
    pub path: Option<PathBuf>,
    /// Normalized transfers
    pub table: TransferTable,
    /// Rows rejected because of malformed content
    pub skipped: Vec<SkippedRow>,
}

impl LoadedPicklist {
    /// File name for display, or `"<stdin>"`-style fallback.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map_or_else(|| "picklist".to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// Loads a picklist CSV from disk.
pub fn load_picklist(path: &Path) -> Result<LoadedPicklist> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open picklist: {}", path.display()))?;
    let mut loaded = parse_picklist(file)
        .with_context(|| format!("Failed to parse picklist: {}", path.display()))?;
    loaded.path = Some(path.to_path_buf());

    tracing::info!(
        path = %path.display(),
        records = loaded.table.len(),
        dropped_zero_volume = loaded.table.dropped_zero_volume(),
        skipped = loaded.skipped.len(),
        "loaded picklist"
    );
    for row in &loaded.skipped {
        tracing::warn!(line = row.line, reason = %row.reason, "skipped picklist row");
    }

    Ok(loaded)
}

/// Parses picklist CSV content.
///
/// Fails only when the header is unreadable or a required column is missing;
/// bad rows are skipped and listed in [`LoadedPicklist::skipped`].
pub fn parse_picklist<R: Read>(reader: R) -> Result<LoadedPicklist> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    check_required_columns(&headers)?;

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for result in rdr.records() {
        let record = result.context("Failed to read CSV row")?;
        let line = record.position().map_or(0, csv::Position::line);

        match parse_row(&record, &headers) {
            Ok(row) => rows.push(row),
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }

    Ok(LoadedPicklist {
        path: None,
        table: TransferTable::load(rows),
        skipped,
    })
}

fn check_required_columns(headers: &StringRecord) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .copied()
        .collect();

    if !missing.is_empty() {
        anyhow::bail!("Missing required column(s): {}", missing.join(", "));
    }
    Ok(())
}

fn parse_row(record: &StringRecord, headers: &StringRecord) -> Result<RawTransfer, String> {
    let row: PicklistRow = record
        .deserialize(Some(headers))
        .map_err(|e| format!("Unreadable row: {e}"))?;

    for well in [&row.source_well, &row.dest_well] {
        name_to_coord(well).map_err(|e| e.to_string())?;
    }

    let volume_nl: f64 = row
        .volume
        .parse()
        .map_err(|_| format!("Invalid {VOLUME_COLUMN}: '{}'", row.volume))?;

    Ok(RawTransfer {
        source_plate: row.source_plate,
        source_well: row.source_well,
        dest_plate: row.dest_plate,
        dest_well: row.dest_well,
        volume_nl,
    })
}
