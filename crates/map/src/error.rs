//! Error types for sre-map.

use sre_events::EventsError;

/// Error type for all fallible operations in the sre-map crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// Configuration or whole-field series error from the events crate.
    #[error(transparent)]
    Events(#[from] EventsError),

    /// Returned when a coordinate vector does not match the data shape.
    #[error("{axis} axis mismatch: expected {expected} coordinates, got {got}")]
    ShapeMismatch {
        /// Axis name (`lat` or `lon`).
        axis: String,
        /// Size of the data along that axis.
        expected: usize,
        /// Number of coordinates supplied.
        got: usize,
    },

    /// Returned when fields joined along time have different grids.
    #[error("cannot concatenate fields: {axis} coordinates differ")]
    GridMismatch {
        /// Axis whose coordinates differ.
        axis: String,
    },

    /// Returned when there is nothing to concatenate.
    #[error("no fields to concatenate")]
    NoFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shape_mismatch() {
        let err = MapError::ShapeMismatch {
            axis: "lat".to_string(),
            expected: 4,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "lat axis mismatch: expected 4 coordinates, got 3"
        );
    }

    #[test]
    fn display_grid_mismatch() {
        let err = MapError::GridMismatch {
            axis: "lon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot concatenate fields: lon coordinates differ"
        );
    }

    #[test]
    fn events_error_is_transparent() {
        let err: MapError = EventsError::InvalidLength { len: 1000 }.into();
        assert_eq!(err.to_string(), EventsError::InvalidLength { len: 1000 }.to_string());
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<MapError>();
    }
}
