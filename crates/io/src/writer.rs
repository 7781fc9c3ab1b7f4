//! High-level writer configuration and orchestration.

use std::collections::BTreeMap;
use std::path::Path;

use parquet::file::properties::WriterProperties;
use serde::Serialize;
use sre_map::GridHistogram;
use tracing::debug;

use crate::error::IoError;
use crate::{parquet_read, parquet_write};

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for Parquet output.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression algorithm to use.
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn properties(&self) -> Result<WriterProperties, IoError> {
        self.validate()?;
        Ok(WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_max_row_group_size(self.row_group_size)
            .build())
    }
}

/// Write daily series to a Parquet file with columns `model`, `day`,
/// `value`. `NaN` values are stored as nulls.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Write`] / [`IoError::Parquet`] if writing fails.
pub fn write_series(
    path: &Path,
    series: &BTreeMap<String, Vec<f64>>,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let props = config.properties()?;
    let schema = parquet_write::series_schema();
    let batches: Vec<_> = series
        .iter()
        .map(|(model, values)| parquet_write::series_to_record_batch(model, values, &schema))
        .collect::<Result<Vec<_>, _>>()?;
    parquet_write::write_batches(path, &batches, &schema, props)?;
    debug!(path = %path.display(), n_models = series.len(), "series written");
    Ok(())
}

/// Read series written by [`write_series`], keyed by model.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] / [`IoError::Validation`] on format errors.
pub fn read_series(path: &Path) -> Result<BTreeMap<String, Vec<f64>>, IoError> {
    let batches = parquet_read::read_batches(path)?;
    parquet_read::group_by_model(&batches)
}

/// Write a grid histogram as a long table with columns `percentile`,
/// `lat_index`, `lon_index`, `lat`, `lon`, `duration`, `count`.
///
/// Only non-zero counts are written; grid points absent from the table have
/// no events.
///
/// # Errors
///
/// Same as [`write_series`].
pub fn write_map(path: &Path, hist: &GridHistogram, config: &WriterConfig) -> Result<(), IoError> {
    let props = config.properties()?;
    let schema = parquet_write::map_schema();
    let batches: Vec<_> = (0..hist.percentiles().len())
        .map(|k| parquet_write::map_to_record_batch(hist, k, &schema))
        .collect::<Result<Vec<_>, _>>()?;
    let n_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    parquet_write::write_batches(path, &batches, &schema, props)?;
    debug!(path = %path.display(), n_rows, "map written");
    Ok(())
}

/// Write any serialisable value as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`IoError::Json`] if serialisation fails or [`IoError::Write`]
/// if the file cannot be written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
