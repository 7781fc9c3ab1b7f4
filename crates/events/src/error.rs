//! Error types for the sre-events crate.

/// Error type for all fallible operations in the sre-events crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventsError {
    /// Returned when the input series is empty.
    #[error("input series is empty")]
    EmptySeries,

    /// Returned when the series length is not a whole number of 365-day years.
    #[error("series length {len} is not a multiple of 365")]
    InvalidLength {
        /// Length of the offending series.
        len: usize,
    },

    /// Returned when a percentile is outside 1..=99.
    #[error("invalid percentile: {percentile} (must be 1..=99)")]
    InvalidPercentile {
        /// The invalid percentile.
        percentile: u8,
    },

    /// Returned when an explicit percentile list is empty.
    #[error("percentile list is empty")]
    NoPercentiles,

    /// Returned when the duration range is inverted.
    #[error("invalid duration range: min_length {min_length} > max_length {max_length}")]
    InvalidLengthRange {
        /// Shortest duration reported.
        min_length: usize,
        /// Longest duration reported.
        max_length: usize,
    },

    /// Returned when `max_length` is too large to be stored.
    #[error("max_length {max_length} exceeds the limit of {limit} days")]
    MaxLengthTooLarge {
        /// Requested longest duration.
        max_length: usize,
        /// Largest accepted value.
        limit: usize,
    },

    /// Returned when a per-year buffer has the wrong length.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_series() {
        assert_eq!(EventsError::EmptySeries.to_string(), "input series is empty");
    }

    #[test]
    fn error_invalid_length() {
        let e = EventsError::InvalidLength { len: 1000 };
        assert_eq!(e.to_string(), "series length 1000 is not a multiple of 365");
    }

    #[test]
    fn error_invalid_percentile() {
        let e = EventsError::InvalidPercentile { percentile: 100 };
        assert_eq!(e.to_string(), "invalid percentile: 100 (must be 1..=99)");
    }

    #[test]
    fn error_invalid_length_range() {
        let e = EventsError::InvalidLengthRange {
            min_length: 10,
            max_length: 3,
        };
        assert_eq!(
            e.to_string(),
            "invalid duration range: min_length 10 > max_length 3"
        );
    }

    #[test]
    fn error_max_length_too_large() {
        let e = EventsError::MaxLengthTooLarge {
            max_length: 70_000,
            limit: 65_535,
        };
        assert_eq!(
            e.to_string(),
            "max_length 70000 exceeds the limit of 65535 days"
        );
    }

    #[test]
    fn error_length_mismatch() {
        let e = EventsError::LengthMismatch {
            expected: 730,
            got: 729,
        };
        assert_eq!(e.to_string(), "length mismatch: expected 730, got 729");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<EventsError>();
    }
}
