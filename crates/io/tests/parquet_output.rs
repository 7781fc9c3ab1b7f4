//! Integration tests: Parquet and JSON output.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use arrow::array::AsArray;
use arrow::datatypes::{Int64Type, UInt8Type, UInt16Type};
use ndarray::Array3;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use sre_events::{PercentileSet, SreConfig};
use sre_io::{Compression, IoError, Mesh, WriterConfig, read_series, write_json, write_map, write_series};
use sre_map::{Field, GridMapBuilder};
use tempfile::tempdir;

#[test]
fn series_roundtrip_keeps_nan_and_models() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("series.parquet");
    let mut series = BTreeMap::new();
    series.insert("A".to_string(), vec![1.0, f64::NAN, 3.0]);
    series.insert("B".to_string(), vec![4.0, 5.0]);

    for compression in [Compression::None, Compression::Snappy, Compression::Zstd] {
        let config = WriterConfig::default().with_compression(compression);
        write_series(&path, &series, &config).unwrap();
        let back = read_series(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_relative_eq!(back["A"][0], 1.0);
        assert!(back["A"][1].is_nan());
        assert_eq!(back["B"], vec![4.0, 5.0]);
    }
}

#[test]
fn read_series_missing_file() {
    let err = read_series(std::path::Path::new("/tmp/sre_no_such.parquet")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

#[test]
fn map_rows_hold_nonzero_counts() {
    let mut series = vec![1.0; 730];
    series[100..105].fill(10.0);
    let values = Array3::from_shape_fn((730, 1, 2), |(t, _, j)| if j == 0 { series[t] } else { 1.0 });
    let field = Field::new(values, vec![47.0], vec![8.0, 9.0]).unwrap();
    let config = SreConfig::new()
        .with_percentiles(PercentileSet::List(vec![95]))
        .with_lengths(3, 10);
    let map = GridMapBuilder::new(config).unwrap().build(&field).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("map.parquet");
    write_map(&path, &map, &WriterConfig::default()).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
    let batches: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 1);

    let batch = &batches[0];
    assert_eq!(batch.column(0).as_primitive::<UInt8Type>().value(0), 95);
    assert_eq!(batch.column(5).as_primitive::<UInt16Type>().value(0), 5);
    assert_eq!(batch.column(6).as_primitive::<Int64Type>().value(0), 1);
}

#[test]
fn json_mesh_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mesh.json");
    let mesh = Mesh {
        lat: vec![-1.0, 1.0],
        lon: vec![0.0],
    };
    write_json(&path, &mesh).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let back: Mesh = serde_json::from_str(&text).unwrap();
    assert_eq!(back, mesh);
}
