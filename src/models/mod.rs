//! Data models for wells, transfers, and plate selections.
//!
//! This module contains the core data structures used throughout the application.
//! Models are independent of the UI and of how picklists are read from disk.

pub mod error;
pub mod selection;
pub mod transfer;
pub mod well;

// Re-export all model types
pub use error::PlateError;
pub use selection::PlateSelection;
pub use transfer::{quantize_volume, RawTransfer, TransferRecord, TRANSFER_UNIT_NL};
pub use well::{coord_to_name, name_to_coord, row_label, PlateSide, WellCoordinate, MAX_ROWS};
