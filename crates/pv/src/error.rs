//! Error types for sre-pv.

use sre_events::EventsError;

/// Error type for all fallible operations in the sre-pv crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PvError {
    /// Returned when a model is given something other than one 365-day year.
    #[error("expected 365 daily values, got {len}")]
    InvalidYearLength {
        /// Number of values supplied.
        len: usize,
    },

    /// Returned when a panel or site parameter is out of range.
    #[error("invalid {field}: {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        field: String,
        /// Offending value.
        value: f64,
        /// Accepted range.
        reason: String,
    },

    /// Returned when a tracking code is not 0, 1 or 2.
    #[error("invalid tracking mode: {code} (must be 0, 1 or 2)")]
    InvalidTracking {
        /// Code supplied.
        code: u8,
    },

    /// Series reshaping error.
    #[error(transparent)]
    Events(#[from] EventsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_year_length() {
        let err = PvError::InvalidYearLength { len: 366 };
        assert_eq!(err.to_string(), "expected 365 daily values, got 366");
    }

    #[test]
    fn display_invalid_parameter() {
        let err = PvError::InvalidParameter {
            field: "tilt".to_string(),
            value: 95.0,
            reason: "must be within 0..=90".to_string(),
        };
        assert_eq!(err.to_string(), "invalid tilt: 95 (must be within 0..=90)");
    }

    #[test]
    fn display_invalid_tracking() {
        let err = PvError::InvalidTracking { code: 3 };
        assert_eq!(err.to_string(), "invalid tracking mode: 3 (must be 0, 1 or 2)");
    }

    #[test]
    fn from_events_error() {
        let err: PvError = EventsError::InvalidLength { len: 10 }.into();
        assert!(matches!(err, PvError::Events(_)));
    }
}
