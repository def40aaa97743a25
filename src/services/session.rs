//! Picklist session: loaded transfers plus the current viewing choices.
//!
//! The session is the single entry point the presentation layers use. It owns
//! the transfer table, the plate-pair selection and the plate settings, and
//! recomputes grids from scratch on every request.

use serde::Serialize;

use crate::config::{CeilingConfig, PlateConfig};
use crate::models::{PlateError, PlateSelection, PlateSide, TransferRecord};
use crate::services::hover::{on_hover, HoverContext, HoverResult};
use crate::services::plate_grid::{compute_grid, PlateGrid, WellState};
use crate::services::timing::{estimate_transfer_time, TransferEstimate};
use crate::services::TransferTable;

/// Source and destination grids for the selected plate pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateGrids {
    /// Grid of the selected source plate
    pub source: PlateGrid,
    /// Grid of the selected destination plate
    pub dest: PlateGrid,
}

impl PlateGrids {
    /// Grid for one side.
    #[must_use]
    pub const fn grid(&self, side: PlateSide) -> &PlateGrid {
        match side {
            PlateSide::Source => &self.source,
            PlateSide::Destination => &self.dest,
        }
    }
}

/// What the presentation should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum PlateView {
    /// Nothing to draw yet (no picklist, or no plate pair chosen)
    NoData(PlateError),
    /// Grids are ready
    Ready(PlateGrids),
}

/// Time estimates for the whole picklist and the selected pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionEstimates {
    /// All transfers in the picklist
    pub total: TransferEstimate,
    /// Transfers between the selected plates only
    pub current_pair: TransferEstimate,
}

/// Loaded picklist and viewing state.
#[derive(Debug, Clone, Default)]
pub struct PicklistSession {
    table: TransferTable,
    selection: Option<PlateSelection>,
    plates: PlateConfig,
    ceilings: CeilingConfig,
}

impl PicklistSession {
    /// Creates an empty session with the given plate settings.
    #[must_use]
    pub fn new(plates: PlateConfig, ceilings: CeilingConfig) -> Self {
        Self {
            table: TransferTable::new(),
            selection: None,
            plates,
            ceilings,
        }
    }

    /// Replaces the loaded transfers and selects the first plate of each side.
    pub fn load(&mut self, table: TransferTable) {
        self.selection = first_plate_pair(&table);
        tracing::info!(
            records = table.len(),
            dropped_zero_volume = table.dropped_zero_volume(),
            selection = ?self.selection,
            "picklist loaded into session"
        );
        self.table = table;
    }

    /// Loaded transfers.
    #[must_use]
    pub const fn table(&self) -> &TransferTable {
        &self.table
    }

    /// Current plate-pair selection.
    #[must_use]
    pub const fn selection(&self) -> Option<&PlateSelection> {
        self.selection.as_ref()
    }

    /// Current plate dimensions.
    #[must_use]
    pub const fn plates(&self) -> &PlateConfig {
        &self.plates
    }

    /// Current ceilings.
    #[must_use]
    pub const fn ceilings(&self) -> &CeilingConfig {
        &self.ceilings
    }

    /// Replaces plate dimensions and ceilings.
    pub fn set_plate_settings(&mut self, plates: PlateConfig, ceilings: CeilingConfig) {
        self.plates = plates;
        self.ceilings = ceilings;
    }

    /// Plate names available on one side, in first-seen order.
    pub fn plate_names(&self, side: PlateSide) -> Result<Vec<String>, PlateError> {
        self.table.unique_plate_names(side)
    }

    /// Selects a plate on one side by name.
    pub fn select_plate(&mut self, side: PlateSide, name: &str) -> Result<(), PlateError> {
        let names = self.plate_names(side)?;
        if !names.iter().any(|n| n == name) {
            return Err(PlateError::NoPlateSelected);
        }

        if self.selection.is_none() {
            self.selection = first_plate_pair(&self.table);
        }
        let selection = self.selection.as_mut().ok_or(PlateError::NoPlateSelected)?;
        selection.set_plate(side, name);
        tracing::debug!(side = %side, plate = name, "plate selected");
        Ok(())
    }

    /// Moves the selection on one side forwards or backwards, wrapping around.
    ///
    /// Returns the newly selected plate name.
    pub fn cycle_plate(&mut self, side: PlateSide, forward: bool) -> Result<String, PlateError> {
        let names = self.plate_names(side)?;
        let selection = self.selection.as_ref().ok_or(PlateError::NoPlateSelected)?;
        let current = names
            .iter()
            .position(|n| n == selection.plate(side))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % names.len()
        } else {
            (current + names.len() - 1) % names.len()
        };
        let name = names[next].clone();
        self.select_plate(side, &name)?;
        Ok(name)
    }

    /// Transfers that touch the selected plate on one side.
    pub fn transfers_for_plate(&self, side: PlateSide) -> Result<Vec<&TransferRecord>, PlateError> {
        let selection = self.require_selection()?;
        Ok(self.table.filter_by_plate(side, selection.plate(side)))
    }

    /// Computes the grid for one side of the selected pair.
    pub fn grid(&self, side: PlateSide) -> Result<PlateGrid, PlateError> {
        let (rows, cols) = self.plates.dimensions(side);
        let grid = compute_grid(
            rows,
            cols,
            self.transfers_for_plate(side)?,
            side,
            self.ceilings.for_side(side),
        )?;
        tracing::debug!(
            side = %side,
            rows,
            cols,
            overfull = grid.count(WellState::Overfull),
            "grid computed"
        );
        Ok(grid)
    }

    /// Computes what to draw for the current inputs.
    ///
    /// Missing data and missing selection are reported as
    /// [`PlateView::NoData`]; an unsupported row count is an error.
    pub fn view(&self) -> Result<PlateView, PlateError> {
        match (self.grid(PlateSide::Source), self.grid(PlateSide::Destination)) {
            (Ok(source), Ok(dest)) => Ok(PlateView::Ready(PlateGrids { source, dest })),
            (Err(err @ PlateError::UnsupportedRowCount { .. }), _)
            | (_, Err(err @ PlateError::UnsupportedRowCount { .. })) => Err(err),
            (Err(reason), _) | (_, Err(reason)) => Ok(PlateView::NoData(reason)),
        }
    }

    /// Hover details for a well, or `None` when there is nothing to hover.
    #[must_use]
    pub fn hover(&self, well: &str, side: PlateSide) -> Option<HoverResult> {
        let selection = self.require_selection().ok()?;
        Some(on_hover(&self.table, well, side, selection))
    }

    /// Hover-machine context for the given grids.
    pub fn hover_context<'a>(&'a self, grids: &'a PlateGrids) -> Result<HoverContext<'a>, PlateError> {
        Ok(HoverContext {
            table: &self.table,
            selection: self.require_selection()?,
            source_grid: &grids.source,
            dest_grid: &grids.dest,
        })
    }

    /// Time estimates for the picklist and the selected pair.
    #[must_use]
    pub fn estimates(&self) -> SessionEstimates {
        let current_pair = self.selection.as_ref().map_or_else(
            || estimate_transfer_time(std::iter::empty()),
            |s| estimate_transfer_time(self.table.filter_by_plate_pair(&s.source, &s.dest)),
        );
        SessionEstimates {
            total: estimate_transfer_time(self.table.records()),
            current_pair,
        }
    }

    fn require_selection(&self) -> Result<&PlateSelection, PlateError> {
        if self.table.is_empty() {
            return Err(PlateError::EmptyTable);
        }
        self.selection.as_ref().ok_or(PlateError::NoPlateSelected)
    }
}

fn first_plate_pair(table: &TransferTable) -> Option<PlateSelection> {
    let source = table.unique_plate_names(PlateSide::Source).ok()?;
    let dest = table.unique_plate_names(PlateSide::Destination).ok()?;
    Some(PlateSelection::new(source.first()?, dest.first()?))
}
