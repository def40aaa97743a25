//! Well addressing: conversion between well names and grid coordinates.
//!
//! Wells are named by a row-letter group followed by a 1-based column number.
//! Rows 0-25 use a single letter (`A`..`Z`); rows 26-51 use `A` followed by a
//! second letter (`AA`..`AZ`). The scheme stops there: row 52 and beyond have
//! no name and are rejected with [`PlateError::UnsupportedRowCount`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::PlateError;

/// Number of rows the row-letter scheme can name.
pub const MAX_ROWS: usize = 52;

const LETTERS: usize = 26;

static WELL_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z])([A-Z])?([1-9][0-9]*)$").expect("well name pattern is valid")
});

/// Which plate of the transfer a well belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateSide {
    /// Plate liquid is drawn from
    Source,
    /// Plate liquid is dispensed into
    Destination,
}

impl PlateSide {
    /// Returns the other side of the transfer.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Source => Self::Destination,
            Self::Destination => Self::Source,
        }
    }

    /// Human-readable label used in titles and messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Destination => "Destination",
        }
    }

    /// Plate name used when a picklist has no plate-name column for this side.
    #[must_use]
    pub const fn default_plate_name(self) -> &'static str {
        match self {
            Self::Source => "sp1",
            Self::Destination => "dp1",
        }
    }
}

impl std::fmt::Display for PlateSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PlateSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "source" | "src" => Ok(Self::Source),
            "destination" | "dest" | "dst" => Ok(Self::Destination),
            other => Err(format!(
                "Invalid plate side '{other}' (expected source or destination)"
            )),
        }
    }
}

/// Zero-based grid coordinate of a well.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WellCoordinate {
    /// Row index (0 = row `A`)
    pub row: usize,
    /// Column index (0 = column `1`)
    pub col: usize,
}

impl WellCoordinate {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the well name for this coordinate.
    pub fn name(self) -> Result<String, PlateError> {
        coord_to_name(self.row, self.col)
    }
}

/// Returns the letter group for a row index.
///
/// # Examples
///
/// - `0` → `"A"`
/// - `25` → `"Z"`
/// - `26` → `"AA"`
/// - `51` → `"AZ"`
pub fn row_label(row: usize) -> Result<String, PlateError> {
    if row < LETTERS {
        Ok(letter(row).to_string())
    } else if row < MAX_ROWS {
        Ok(format!("A{}", letter(row - LETTERS)))
    } else {
        Err(PlateError::UnsupportedRowCount { rows: row + 1 })
    }
}

/// Converts a zero-based coordinate into a well name such as `"B12"`.
pub fn coord_to_name(row: usize, col: usize) -> Result<String, PlateError> {
    Ok(format!("{}{}", row_label(row)?, col + 1))
}

/// Parses a well name such as `"B12"` or `"AC3"` into a coordinate.
///
/// Only the canonical form is accepted (upper-case letters, no leading zeros),
/// so that `coord_to_name(name_to_coord(w)) == w` holds for every accepted name.
pub fn name_to_coord(name: &str) -> Result<WellCoordinate, PlateError> {
    let caps = WELL_NAME_REGEX
        .captures(name)
        .ok_or_else(|| PlateError::malformed(name))?;

    let first = letter_index(&caps[1]);
    let row = match caps.get(2) {
        None => first,
        // Two-letter rows always start with 'A'
        Some(second) if first == 0 => LETTERS + letter_index(second.as_str()),
        Some(_) => return Err(PlateError::malformed(name)),
    };

    let column: usize = caps[3]
        .parse()
        .map_err(|_| PlateError::malformed(name))?;

    Ok(WellCoordinate::new(row, column - 1))
}

fn letter(index: usize) -> char {
    // index < 26 is guaranteed by callers
    char::from(b'A' + index as u8)
}

fn letter_index(s: &str) -> usize {
    usize::from(s.as_bytes()[0] - b'A')
}
