//! # sre-map
//!
//! Duration histograms of Sustained Radiation Events for every grid point of
//! a `time × lat × lon` field.
//!
//! Each grid point is analysed independently with
//! [`sre_events::SreEngine::duration_totals`]; the per-point results are
//! merged in row-major `(lat, lon)` order into a [`GridHistogram`] of shape
//! `(n_percentiles, n_lat, n_lon, max_length + 1)`. The sweep can run on the
//! rayon thread pool and reports progress as points complete.
//!
//! ```
//! use ndarray::Array3;
//! use sre_events::{PercentileSet, SreConfig};
//! use sre_map::{Field, GridMapBuilder};
//!
//! let values = Array3::from_shape_fn((730, 2, 3), |(t, _, _)| (t % 365) as f64);
//! let field = Field::new(values, vec![10.0, 20.0], vec![0.0, 1.0, 2.0]).unwrap();
//!
//! let config = SreConfig::new()
//!     .with_percentiles(PercentileSet::List(vec![90]))
//!     .with_lengths(3, 8);
//! let map = GridMapBuilder::new(config).unwrap().build(&field).unwrap();
//! assert_eq!(map.counts().dim(), (1, 2, 3, 9));
//! ```

mod builder;
mod error;
mod field;
mod grid;

pub use builder::GridMapBuilder;
pub use error::MapError;
pub use field::Field;
pub use grid::{FailedPoint, GridHistogram};
