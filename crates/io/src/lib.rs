//! # sre-io
//!
//! Read daily climate variables from NetCDF files and write SRE results to
//! Parquet and JSON. Bridges external file formats into the `&[f64]` and
//! [`sre_map::Field`] inputs of the analysis crates.
//!
//! Errors carry a [`FailureKind`] so that drivers can tell malformed data
//! (`Structural`) from failing files or libraries (`Upstream`).

mod error;
mod extract;
mod location;
mod netcdf_read;
mod parquet_read;
mod parquet_write;
mod reader;
mod writer;

pub use error::{FailureKind, IoError};
pub use extract::{ExtractReport, ModelFailure, ModelSource, OutputMode, extract_location, output_path};
pub use location::{Coordinates, Gazetteer, LocationResolver, grid_indices, nearest_index, normalize_lon};
pub use reader::{Mesh, PointSeries, ReaderConfig, read_field, read_mesh, read_point_series};
pub use writer::{Compression, WriterConfig, read_series, write_json, write_map, write_series};
