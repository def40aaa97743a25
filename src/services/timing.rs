//! Rough run-time estimate for a set of transfers.
//!
//! Calibrated for the AQ_BP fluid class only: roughly 6.7 s per 30 transfers
//! plus 0.8 s per 6000 nL dispensed.

use serde::Serialize;

use crate::models::TransferRecord;

const SECONDS_PER_TRANSFER: f64 = 6.7 / 30.0;
const SECONDS_PER_NL: f64 = 0.8 / 6000.0;

/// Estimated duration of a transfer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransferEstimate {
    /// Whole seconds
    pub seconds: u64,
}

impl TransferEstimate {
    /// Minutes part.
    #[must_use]
    pub const fn minutes(self) -> u64 {
        self.seconds / 60
    }

    /// Seconds remaining after whole minutes.
    #[must_use]
    pub const fn remainder_seconds(self) -> u64 {
        self.seconds % 60
    }
}

impl std::fmt::Display for TransferEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} min {} sec", self.minutes(), self.remainder_seconds())
    }
}

/// Estimates how long the liquid handler needs for `records`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate_transfer_time<'a, I>(records: I) -> TransferEstimate
where
    I: IntoIterator<Item = &'a TransferRecord>,
{
    let (count, volume) = records
        .into_iter()
        .fold((0u64, 0u64), |(n, v), r| (n + 1, v + r.volume_nl));
    let seconds = (count as f64).mul_add(SECONDS_PER_TRANSFER, volume as f64 * SECONDS_PER_NL);
    TransferEstimate {
        seconds: seconds.round_ties_even().max(0.0) as u64,
    }
}
