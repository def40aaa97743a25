//! Service layer for the transfer-aggregation model.
//!
//! This module contains the services that turn loaded transfer records into
//! per-plate grids, hover summaries and time estimates.

pub mod hover;
pub mod plate_grid;
pub mod session;
pub mod timing;
pub mod transfer_table;

// Re-export commonly used types and functions
pub use hover::{on_hover, on_leave, HoverEvent, HoverResult, HoverState, HoveredWell, RelatedWell};
pub use plate_grid::{compute_grid, PlateGrid, WellState};
pub use session::{PicklistSession, PlateGrids, PlateView};
pub use timing::{estimate_transfer_time, TransferEstimate};
pub use transfer_table::TransferTable;
