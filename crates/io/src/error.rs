//! Error types for sre-io.

use std::path::PathBuf;

use sre_map::MapError;

/// Broad classification of an [`IoError`], so callers can branch on the
/// cause without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The data was readable but does not have the expected structure.
    Structural,
    /// A file, library or the file system failed.
    Upstream,
}

/// Error type for all fallible operations in the sre-io crate.
///
/// Covers file-system failures, format-specific errors from NetCDF, Parquet
/// and JSON, and structural problems with otherwise readable data.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Wraps a JSON serialisation failure.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when an output file or directory cannot be written.
    #[error("cannot write {}: {reason}", path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when the time length is not a whole number of 365-day years.
    #[error("time length {len} is not a multiple of 365")]
    InvalidLength {
        /// Number of time steps read.
        len: usize,
    },

    /// Returned when a time axis cannot be parsed.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when a location name is not known to the resolver.
    #[error("unknown location '{name}'")]
    UnknownLocation {
        /// Name that was looked up.
        name: String,
    },

    /// Grid assembly error from the map crate.
    #[error(transparent)]
    Map(#[from] MapError),
}

impl IoError {
    /// Whether this error comes from the data's structure or from upstream.
    pub fn kind(&self) -> FailureKind {
        match self {
            IoError::FileNotFound { .. }
            | IoError::Netcdf { .. }
            | IoError::Parquet { .. }
            | IoError::Json { .. }
            | IoError::Write { .. } => FailureKind::Upstream,
            IoError::Validation { .. }
            | IoError::MissingVariable { .. }
            | IoError::DimensionMismatch { .. }
            | IoError::InvalidLength { .. }
            | IoError::InvalidTime { .. }
            | IoError::UnknownLocation { .. }
            | IoError::Map(_) => FailureKind::Structural,
        }
    }
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.nc");
    }

    #[test]
    fn display_netcdf() {
        let err = IoError::Netcdf {
            reason: "bad header".to_string(),
        };
        assert_eq!(err.to_string(), "netcdf error: bad header");
    }

    #[test]
    fn display_write() {
        let err = IoError::Write {
            path: PathBuf::from("/out/map.parquet"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot write /out/map.parquet: permission denied"
        );
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "rsds".to_string(),
            path: PathBuf::from("/data/rsds_day.nc"),
        };
        assert_eq!(
            err.to_string(),
            "variable 'rsds' not found in /data/rsds_day.nc"
        );
    }

    #[test]
    fn display_invalid_length() {
        let err = IoError::InvalidLength { len: 1000 };
        assert_eq!(err.to_string(), "time length 1000 is not a multiple of 365");
    }

    #[test]
    fn display_unknown_location() {
        let err = IoError::UnknownLocation {
            name: "Atlantis".to_string(),
        };
        assert_eq!(err.to_string(), "unknown location 'Atlantis'");
    }

    #[test]
    fn kinds() {
        assert_eq!(
            IoError::FileNotFound {
                path: PathBuf::from("x")
            }
            .kind(),
            FailureKind::Upstream
        );
        assert_eq!(
            IoError::Netcdf {
                reason: String::new()
            }
            .kind(),
            FailureKind::Upstream
        );
        assert_eq!(
            IoError::InvalidLength { len: 3 }.kind(),
            FailureKind::Structural
        );
        assert_eq!(
            IoError::MissingVariable {
                name: "rsds".into(),
                path: PathBuf::from("x")
            }
            .kind(),
            FailureKind::Structural
        );
        assert_eq!(
            IoError::from(MapError::NoFields).kind(),
            FailureKind::Structural
        );
    }

    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("test nc error".to_string());
        let err: IoError = nc_err.into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn from_parquet_error() {
        let pq_err = parquet::errors::ParquetError::General("test pq error".to_string());
        let err: IoError = pq_err.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("test pq error"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
