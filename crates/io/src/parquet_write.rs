//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray, UInt8Array, UInt16Array,
    UInt32Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use sre_map::GridHistogram;

use crate::error::IoError;

/// Arrow schema for daily series: `model`, `day`, `value`.
pub(crate) fn series_schema() -> Schema {
    Schema::new(vec![
        Field::new("model", DataType::Utf8, false),
        Field::new("day", DataType::UInt32, false),
        Field::new("value", DataType::Float64, true),
    ])
}

/// One batch holding a whole series; `day` is the 0-based index into it.
pub(crate) fn series_to_record_batch(
    model: &str,
    values: &[f64],
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let n = values.len();
    let model_col: ArrayRef = Arc::new(StringArray::from(vec![model; n]));
    let day_col: ArrayRef = Arc::new(UInt32Array::from_iter_values(0..n as u32));
    // Missing values are stored as nulls.
    let value_col: ArrayRef = Arc::new(Float64Array::from_iter(
        values.iter().map(|&v| (!v.is_nan()).then_some(v)),
    ));

    Ok(RecordBatch::try_new(
        Arc::new(schema.clone()),
        vec![model_col, day_col, value_col],
    )?)
}

/// Arrow schema for grid histograms in long format.
pub(crate) fn map_schema() -> Schema {
    Schema::new(vec![
        Field::new("percentile", DataType::UInt8, false),
        Field::new("lat_index", DataType::UInt32, false),
        Field::new("lon_index", DataType::UInt32, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("lon", DataType::Float64, false),
        Field::new("duration", DataType::UInt16, false),
        Field::new("count", DataType::Int64, false),
    ])
}

/// One batch per percentile with a row for every non-zero cell.
pub(crate) fn map_to_record_batch(
    hist: &GridHistogram,
    k: usize,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let percentile = hist.percentiles()[k];
    let (_, n_lat, n_lon, n_buckets) = hist.counts().dim();

    let mut lat_index = Vec::new();
    let mut lon_index = Vec::new();
    let mut lat = Vec::new();
    let mut lon = Vec::new();
    let mut duration = Vec::new();
    let mut count = Vec::new();

    for i in 0..n_lat {
        for j in 0..n_lon {
            for d in 0..n_buckets {
                let c = hist.counts()[[k, i, j, d]];
                if c == 0 {
                    continue;
                }
                lat_index.push(i as u32);
                lon_index.push(j as u32);
                lat.push(hist.lats()[i]);
                lon.push(hist.lons()[j]);
                duration.push(u16::try_from(d).map_err(|_| IoError::Validation {
                    count: 1,
                    details: format!("duration {d} does not fit the u16 duration column"),
                })?);
                count.push(c);
            }
        }
    }

    let n = count.len();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt8Array::from(vec![percentile; n])),
        Arc::new(UInt32Array::from(lat_index)),
        Arc::new(UInt32Array::from(lon_index)),
        Arc::new(Float64Array::from(lat)),
        Arc::new(Float64Array::from(lon)),
        Arc::new(UInt16Array::from(duration)),
        Arc::new(Int64Array::from(count)),
    ];
    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be created, or
/// [`IoError::Parquet`] if batch writing or file finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}
