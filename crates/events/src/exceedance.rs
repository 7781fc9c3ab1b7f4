//! Threshold exceedance masks.

use serde::Serialize;

use crate::error::EventsError;

/// Which side of the threshold counts as an exceedance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Value strictly above the threshold.
    Above,
    /// Value strictly below the threshold.
    Below,
}

impl Direction {
    /// Upper-tail percentiles (> 50) look for excess, all others (including
    /// exactly 50) for deficit.
    pub fn for_percentile(percentile: u8) -> Self {
        if percentile > 50 {
            Direction::Above
        } else {
            Direction::Below
        }
    }

    /// Whether `value` exceeds `threshold` in this direction.
    ///
    /// Always `false` when either side is `NaN`.
    #[inline]
    pub fn exceeds(self, value: f64, threshold: f64) -> bool {
        match self {
            Direction::Above => value > threshold,
            Direction::Below => value < threshold,
        }
    }
}

/// Flags every day whose value exceeds its threshold in `direction`.
///
/// # Errors
///
/// Returns [`EventsError::LengthMismatch`] if `values` and `thresholds` differ
/// in length.
pub fn exceedance_mask(
    values: &[f64],
    thresholds: &[f64],
    direction: Direction,
) -> Result<Vec<bool>, EventsError> {
    if values.len() != thresholds.len() {
        return Err(EventsError::LengthMismatch {
            expected: values.len(),
            got: thresholds.len(),
        });
    }
    Ok(values
        .iter()
        .zip(thresholds)
        .map(|(&v, &t)| direction.exceeds(v, t))
        .collect())
}
