//! Error conditions raised by the well-addressing and aggregation model.

use super::well::MAX_ROWS;

/// Domain errors for plate addressing and transfer queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlateError {
    /// Well name does not match the row-letter/column-number pattern
    MalformedWellName {
        /// The offending well name
        name: String,
    },
    /// Grid requests more rows than the row-letter scheme can name
    UnsupportedRowCount {
        /// Requested row count (or the row index that failed)
        rows: usize,
    },
    /// No transfer records have been loaded
    EmptyTable,
    /// No source/destination plate pair has been chosen
    NoPlateSelected,
}

impl PlateError {
    /// Creates a `MalformedWellName` error for the given name.
    pub fn malformed(name: impl Into<String>) -> Self {
        Self::MalformedWellName { name: name.into() }
    }
}

impl std::fmt::Display for PlateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedWellName { name } => {
                write!(f, "Malformed well name: '{name}'")
            }
            Self::UnsupportedRowCount { rows } => write!(
                f,
                "Unsupported row count: {rows} (row letters only cover {MAX_ROWS} rows)"
            ),
            Self::EmptyTable => write!(f, "No picklist loaded"),
            Self::NoPlateSelected => write!(f, "No plate pair selected"),
        }
    }
}

impl std::error::Error for PlateError {}
