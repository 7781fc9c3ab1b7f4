//! Low-level Parquet reading and column extraction.

use std::collections::BTreeMap;
use std::path::Path;

use arrow::array::{Array, AsArray, RecordBatch};
use arrow::datatypes::{Float64Type, UInt32Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;

/// Column names of the series schema.
const SERIES_COLUMNS: [&str; 3] = ["model", "day", "value"];

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    Ok(reader.collect::<Result<Vec<_>, _>>()?)
}

/// Checks that a batch has the series columns in order.
pub(crate) fn validate_series_schema(batch: &RecordBatch) -> Result<(), IoError> {
    let schema = batch.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    if names != SERIES_COLUMNS {
        return Err(IoError::Validation {
            count: 1,
            details: format!("expected columns {SERIES_COLUMNS:?}, got {names:?}"),
        });
    }
    Ok(())
}

/// Groups rows by model, placing each value at its `day` index. Nulls become
/// `NaN`.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if a column has an unexpected type or a
/// model's days are not exactly `0..n`.
pub(crate) fn group_by_model(
    batches: &[RecordBatch],
) -> Result<BTreeMap<String, Vec<f64>>, IoError> {
    let mut rows: BTreeMap<String, Vec<(u32, f64)>> = BTreeMap::new();

    for batch in batches {
        validate_series_schema(batch)?;
        let models = batch.column(0).as_string_opt::<i32>().ok_or_else(|| type_error("model"))?;
        let days = batch
            .column(1)
            .as_primitive_opt::<UInt32Type>()
            .ok_or_else(|| type_error("day"))?;
        let values = batch
            .column(2)
            .as_primitive_opt::<Float64Type>()
            .ok_or_else(|| type_error("value"))?;

        for r in 0..batch.num_rows() {
            let v = if values.is_null(r) { f64::NAN } else { values.value(r) };
            rows.entry(models.value(r).to_string())
                .or_default()
                .push((days.value(r), v));
        }
    }

    rows.into_iter()
        .map(|(model, mut pairs)| {
            pairs.sort_by_key(|&(d, _)| d);
            if pairs.iter().enumerate().any(|(i, &(d, _))| d as usize != i) {
                return Err(IoError::Validation {
                    count: 1,
                    details: format!("model '{model}': days are not contiguous from 0"),
                });
            }
            Ok((model, pairs.into_iter().map(|(_, v)| v).collect()))
        })
        .collect()
}

fn type_error(column: &str) -> IoError {
    IoError::Validation {
        count: 1,
        details: format!("column '{column}' has an unexpected type"),
    }
}
