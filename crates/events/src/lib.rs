//! Sustained Radiation Event (SRE) detection.
//!
//! An SRE is a maximal run of consecutive days on which a daily series stays
//! beyond a calendar-day percentile threshold: above it for upper-tail
//! percentiles (> 50), below it otherwise.
//!
//! # Pipeline
//!
//! ```text
//!  ┌───────────┐   ┌────────────┐   ┌─────────────┐   ┌────────────┐   ┌──────────────┐
//!  │  reshape  │──▶│ threshold  │──▶│ exceedance  │──▶│    runs    │──▶│  histogram   │
//!  │ (years ×  │   │ (per DOY   │   │ (0/1 mask)  │   │ (run-start │   │ (per-DOY     │
//!  │   365)    │   │ percentile)│   │             │   │  lengths)  │   │  durations)  │
//!  └───────────┘   └────────────┘   └─────────────┘   └────────────┘   └──────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use sre_events::{PercentileSet, SreConfig, SreEngine};
//!
//! // Two years of a smooth seasonal cycle
//! let series: Vec<f64> = (0..730)
//!     .map(|i| 200.0 + 100.0 * ((i % 365) as f64 / 365.0 * std::f64::consts::TAU).sin())
//!     .collect();
//!
//! let config = SreConfig::new()
//!     .with_percentiles(PercentileSet::List(vec![5, 95]))
//!     .with_lengths(3, 10);
//! let output = SreEngine::new(config).unwrap().run(&series).unwrap();
//!
//! assert_eq!(output.n_years(), 2);
//! assert_eq!(output.get(95).unwrap().per_day().dim(), (365, 11));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod exceedance;
pub mod histogram;
pub mod reshape;
pub mod result;
pub mod runs;
pub mod threshold;

pub use config::{MAX_EVENT_LENGTH, MIN_EVENT_FLOOR, PercentileSet, SreConfig};
pub use engine::{SreEngine, compute_sres};
pub use error::EventsError;
pub use exceedance::{Direction, exceedance_mask};
pub use histogram::{DurationCounts, count_occurrences};
pub use reshape::{ReshapedSeries, reshape};
pub use result::{Event, PercentileRecord, SreOutput};
pub use runs::{apply_floor, encode_runs, run_means};
pub use threshold::{SortedColumns, calendar_thresholds, tile_thresholds};
