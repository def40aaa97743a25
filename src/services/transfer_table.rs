//! Normalized, append-only table of transfer records.
//!
//! All queries borrow the table immutably; once loaded the table is only ever
//! extended, so concurrent readers never observe partial state.

use std::collections::HashMap;

use crate::models::{PlateError, PlateSide, RawTransfer, TransferRecord};

/// Loaded picklist transfers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferTable {
    records: Vec<TransferRecord>,
    dropped_zero_volume: usize,
}

impl TransferTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            dropped_zero_volume: 0,
        }
    }

    /// Builds a table from raw loader rows.
    ///
    /// Plate names default per missing field and rows whose quantized volume
    /// is zero are dropped (and counted).
    pub fn load(rows: impl IntoIterator<Item = RawTransfer>) -> Self {
        let mut table = Self::new();
        table.extend(rows);
        table
    }

    /// Builds a table from already-normalized records.
    #[must_use]
    pub fn from_records(records: Vec<TransferRecord>) -> Self {
        Self {
            records,
            dropped_zero_volume: 0,
        }
    }

    /// Appends more raw rows to the table.
    pub fn extend(&mut self, rows: impl IntoIterator<Item = RawTransfer>) {
        for row in rows {
            match row.normalize() {
                Some(record) => self.records.push(record),
                None => self.dropped_zero_volume += 1,
            }
        }
    }

    /// All records in load order.
    #[must_use]
    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }

    /// Number of records kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows discarded because their quantized volume was zero.
    #[must_use]
    pub const fn dropped_zero_volume(&self) -> usize {
        self.dropped_zero_volume
    }

    /// Distinct plate names on one side, in first-seen order.
    pub fn unique_plate_names(&self, side: PlateSide) -> Result<Vec<String>, PlateError> {
        if self.records.is_empty() {
            return Err(PlateError::EmptyTable);
        }

        let mut names: Vec<String> = Vec::new();
        for record in &self.records {
            let plate = record.plate(side);
            if !names.iter().any(|name| name == plate) {
                names.push(plate.to_string());
            }
        }
        Ok(names)
    }

    /// Transfers touching `well` on `side` of plate `plate_name`.
    #[must_use]
    pub fn filter_by_well(
        &self,
        well: &str,
        side: PlateSide,
        plate_name: &str,
    ) -> Vec<&TransferRecord> {
        self.records
            .iter()
            .filter(|r| r.well(side) == well && r.plate(side) == plate_name)
            .collect()
    }

    /// Transfers involving plate `plate_name` on `side`, any plate on the other side.
    #[must_use]
    pub fn filter_by_plate(&self, side: PlateSide, plate_name: &str) -> Vec<&TransferRecord> {
        self.records
            .iter()
            .filter(|r| r.plate(side) == plate_name)
            .collect()
    }

    /// Transfers between exactly this source plate and this destination plate.
    #[must_use]
    pub fn filter_by_plate_pair(
        &self,
        source_plate: &str,
        dest_plate: &str,
    ) -> Vec<&TransferRecord> {
        self.records
            .iter()
            .filter(|r| r.source_plate == source_plate && r.dest_plate == dest_plate)
            .collect()
    }

    /// Sum of volumes over the given records (0 for none).
    #[must_use]
    pub fn total_volume<'a, I>(records: I) -> u64
    where
        I: IntoIterator<Item = &'a TransferRecord>,
    {
        records.into_iter().map(|r| r.volume_nl).sum()
    }

    /// Aggregates volumes per well name on `side` in a single pass.
    #[must_use]
    pub fn volumes_by_well<'a, I>(records: I, side: PlateSide) -> HashMap<&'a str, u64>
    where
        I: IntoIterator<Item = &'a TransferRecord>,
    {
        let mut volumes: HashMap<&'a str, u64> = HashMap::new();
        for record in records {
            *volumes.entry(record.well(side)).or_insert(0) += record.volume_nl;
        }
        volumes
    }
}
