//! Active plate-pair selection.

use serde::{Deserialize, Serialize};

use super::PlateSide;

/// The source/destination plate pair currently being viewed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlateSelection {
    /// Selected source plate name
    pub source: String,
    /// Selected destination plate name
    pub dest: String,
}

impl PlateSelection {
    /// Creates a selection for the given plate pair.
    pub fn new(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// Selected plate name on the given side.
    #[must_use]
    pub fn plate(&self, side: PlateSide) -> &str {
        match side {
            PlateSide::Source => &self.source,
            PlateSide::Destination => &self.dest,
        }
    }

    /// Replaces the plate on one side, keeping the other.
    pub fn set_plate(&mut self, side: PlateSide, name: impl Into<String>) {
        match side {
            PlateSide::Source => self.source = name.into(),
            PlateSide::Destination => self.dest = name.into(),
        }
    }
}

impl std::fmt::Display for PlateSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.source, self.dest)
    }
}
