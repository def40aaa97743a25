//! Per-well fill-state classification for a whole plate.

use serde::Serialize;

use crate::models::{
    coord_to_name, name_to_coord, PlateError, PlateSide, TransferRecord, WellCoordinate, MAX_ROWS,
};
use crate::services::TransferTable;

/// Fill state of a single well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WellState {
    /// No transfer touches this well
    Empty,
    /// Transfers touch this well and stay within the ceiling
    Used,
    /// Aggregated volume exceeds the ceiling
    Overfull,
}

impl WellState {
    /// Classifies an aggregated volume against a ceiling.
    ///
    /// The comparison is strict: a total equal to the ceiling is still `Used`.
    #[must_use]
    pub fn classify(total_volume_nl: Option<u64>, ceiling_nl: f64) -> Self {
        match total_volume_nl {
            None => Self::Empty,
            Some(total) if total as f64 > ceiling_nl => Self::Overfull,
            Some(_) => Self::Used,
        }
    }
}

/// A transfer well that could not be placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffGridWell {
    /// Well name as written in the picklist
    pub well: String,
    /// Aggregated volume in nanoliters
    pub volume_nl: u64,
    /// Why the well is not on the grid
    pub reason: String,
}

/// Computed fill states for one plate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateGrid {
    side: PlateSide,
    rows: usize,
    cols: usize,
    ceiling_nl: f64,
    states: Vec<Vec<WellState>>,
    volumes: Vec<Vec<u64>>,
    off_grid: Vec<OffGridWell>,
}

impl PlateGrid {
    /// Plate side this grid was computed for.
    #[must_use]
    pub const fn side(&self) -> PlateSide {
        self.side
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Ceiling the grid was classified against.
    #[must_use]
    pub const fn ceiling_nl(&self) -> f64 {
        self.ceiling_nl
    }

    /// State of the well at (row, col), `None` outside the grid.
    #[must_use]
    pub fn state(&self, row: usize, col: usize) -> Option<WellState> {
        self.states.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Aggregated volume at (row, col), `None` outside the grid.
    #[must_use]
    pub fn volume(&self, row: usize, col: usize) -> Option<u64> {
        self.volumes.get(row).and_then(|r| r.get(col)).copied()
    }

    /// State of a well by name.
    pub fn state_of(&self, well: &str) -> Result<Option<WellState>, PlateError> {
        let coord = name_to_coord(well)?;
        Ok(self.state(coord.row, coord.col))
    }

    /// Rows of well states.
    #[must_use]
    pub fn states(&self) -> &[Vec<WellState>] {
        &self.states
    }

    /// Number of wells in the given state.
    #[must_use]
    pub fn count(&self, state: WellState) -> usize {
        self.states.iter().flatten().filter(|s| **s == state).count()
    }

    /// Wells referenced by transfers that do not map onto this grid.
    #[must_use]
    pub fn off_grid_wells(&self) -> &[OffGridWell] {
        &self.off_grid
    }

    /// Iterates every cell as (coordinate, state, volume) in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (WellCoordinate, WellState, u64)> + '_ {
        self.states.iter().enumerate().flat_map(move |(row, states)| {
            states.iter().enumerate().map(move |(col, state)| {
                (WellCoordinate::new(row, col), *state, self.volumes[row][col])
            })
        })
    }
}

/// Computes the fill state of every well on a rows×cols plate.
///
/// `transfers` should already be filtered to the plate being drawn. Volumes are
/// aggregated per well once, then each cell is classified against
/// `ceiling_nl`.
pub fn compute_grid<'a, I>(
    rows: usize,
    cols: usize,
    transfers: I,
    side: PlateSide,
    ceiling_nl: f64,
) -> Result<PlateGrid, PlateError>
where
    I: IntoIterator<Item = &'a TransferRecord>,
{
    if rows > MAX_ROWS {
        return Err(PlateError::UnsupportedRowCount { rows });
    }

    let mut by_well = TransferTable::volumes_by_well(transfers, side);

    let mut states = Vec::with_capacity(rows);
    let mut volumes = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut state_row = Vec::with_capacity(cols);
        let mut volume_row = Vec::with_capacity(cols);
        for col in 0..cols {
            let name = coord_to_name(row, col)?;
            let total = by_well.remove(name.as_str());
            state_row.push(WellState::classify(total, ceiling_nl));
            volume_row.push(total.unwrap_or(0));
        }
        states.push(state_row);
        volumes.push(volume_row);
    }

    // Whatever is left in the map never matched a grid cell
    let mut off_grid: Vec<OffGridWell> = by_well
        .into_iter()
        .map(|(well, volume_nl)| {
            let reason = match name_to_coord(well) {
                Ok(coord) => format!(
                    "outside {rows}x{cols} plate (row {}, column {})",
                    coord.row + 1,
                    coord.col + 1
                ),
                Err(err) => err.to_string(),
            };
            OffGridWell {
                well: well.to_string(),
                volume_nl,
                reason,
            }
        })
        .collect();
    off_grid.sort_by(|a, b| a.well.cmp(&b.well));

    Ok(PlateGrid {
        side,
        rows,
        cols,
        ceiling_nl,
        states,
        volumes,
        off_grid,
    })
}
