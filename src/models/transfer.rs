//! Transfer records and volume quantization.

use serde::{Deserialize, Serialize};

use super::PlateSide;

/// Smallest volume the liquid handler can dispense, in nanoliters.
pub const TRANSFER_UNIT_NL: u64 = 25;

/// One liquid transfer from a source well to a destination well.
///
/// Records are immutable once loaded. Volumes are already quantized to
/// [`TRANSFER_UNIT_NL`] and never zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Source plate name
    pub source_plate: String,
    /// Source well name (e.g. "A1")
    pub source_well: String,
    /// Destination plate name
    pub dest_plate: String,
    /// Destination well name (e.g. "B2")
    pub dest_well: String,
    /// Transfer volume in nanoliters
    pub volume_nl: u64,
}

impl TransferRecord {
    /// Creates a record from already-quantized values.
    pub fn new(
        source_plate: impl Into<String>,
        source_well: impl Into<String>,
        dest_plate: impl Into<String>,
        dest_well: impl Into<String>,
        volume_nl: u64,
    ) -> Self {
        Self {
            source_plate: source_plate.into(),
            source_well: source_well.into(),
            dest_plate: dest_plate.into(),
            dest_well: dest_well.into(),
            volume_nl,
        }
    }

    /// Plate name on the given side.
    #[must_use]
    pub fn plate(&self, side: PlateSide) -> &str {
        match side {
            PlateSide::Source => &self.source_plate,
            PlateSide::Destination => &self.dest_plate,
        }
    }

    /// Well name on the given side.
    #[must_use]
    pub fn well(&self, side: PlateSide) -> &str {
        match side {
            PlateSide::Source => &self.source_well,
            PlateSide::Destination => &self.dest_well,
        }
    }
}

/// A transfer row as supplied by a loader, before normalization.
///
/// Plate names are optional; volumes are raw nanoliters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTransfer {
    /// Source plate name, if the picklist names one
    pub source_plate: Option<String>,
    /// Source well name
    pub source_well: String,
    /// Destination plate name, if the picklist names one
    pub dest_plate: Option<String>,
    /// Destination well name
    pub dest_well: String,
    /// Requested volume in nanoliters
    pub volume_nl: f64,
}

impl RawTransfer {
    /// Normalizes this row into a [`TransferRecord`].
    ///
    /// Missing plate names fall back per side (`sp1` / `dp1`). Returns `None`
    /// when the quantized volume is zero or negative.
    pub fn normalize(self) -> Option<TransferRecord> {
        let volume_nl = quantize_volume(self.volume_nl)?;
        Some(TransferRecord {
            source_plate: plate_or_default(self.source_plate, PlateSide::Source),
            source_well: self.source_well,
            dest_plate: plate_or_default(self.dest_plate, PlateSide::Destination),
            dest_well: self.dest_well,
            volume_nl,
        })
    }
}

fn plate_or_default(name: Option<String>, side: PlateSide) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => side.default_plate_name().to_string(),
    }
}

/// Rounds a raw volume to the nearest multiple of [`TRANSFER_UNIT_NL`].
///
/// Halfway cases round to the even multiple. Returns `None` when the result is
/// not a positive volume (including NaN input).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quantize_volume(raw_nl: f64) -> Option<u64> {
    let units = (raw_nl / TRANSFER_UNIT_NL as f64).round_ties_even();
    if units.is_finite() && units >= 1.0 {
        Some(units as u64 * TRANSFER_UNIT_NL)
    } else {
        None
    }
}
