//! Grid sweep orchestration.

use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::{Array4, s};
use rayon::prelude::*;
use sre_calendar::DAYS_PER_YEAR;
use sre_events::{DurationCounts, EventsError, SreConfig, SreEngine};
use tracing::{debug, info, warn};

use crate::error::MapError;
use crate::field::Field;
use crate::grid::{FailedPoint, GridHistogram};

/// Builds a [`GridHistogram`] from a [`Field`].
///
/// Every grid point is analysed independently and produces its own result;
/// the builder merges them into disjoint cells afterwards, so the output does
/// not depend on execution order. A point whose series has no valid value is
/// recorded as failed and left at zero.
#[derive(Debug, Clone)]
pub struct GridMapBuilder {
    engine: SreEngine,
    parallel: bool,
    progress_interval: usize,
}

impl GridMapBuilder {
    /// Creates a builder. Parallel by default, logging progress every 1000
    /// points.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Events`] if `config` is invalid.
    pub fn new(config: SreConfig) -> Result<Self, MapError> {
        Ok(Self {
            engine: SreEngine::new(config)?,
            parallel: true,
            progress_interval: 1000,
        })
    }

    /// Runs the sweep on the rayon thread pool (`true`) or sequentially.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Logs progress every `interval` completed points (0 disables).
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Underlying per-series engine.
    pub fn engine(&self) -> &SreEngine {
        &self.engine
    }

    /// Sweeps the whole field.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Events`] if the field's time length is zero or not
    /// a multiple of 365. Nothing is computed in that case.
    pub fn build(&self, field: &Field) -> Result<GridHistogram, MapError> {
        self.build_with_progress(field, |_, _| {})
    }

    /// Like [`build`](Self::build), calling `progress(completed, total)`
    /// after every point. The callback may be invoked from several threads.
    pub fn build_with_progress<F>(&self, field: &Field, progress: F) -> Result<GridHistogram, MapError>
    where
        F: Fn(usize, usize) + Sync,
    {
        let n_time = field.n_time();
        if n_time == 0 {
            return Err(EventsError::EmptySeries.into());
        }
        if n_time % DAYS_PER_YEAR != 0 {
            return Err(EventsError::InvalidLength { len: n_time }.into());
        }

        let (n_lat, n_lon) = (field.n_lat(), field.n_lon());
        let total = n_lat * n_lon;
        let percentiles = self.engine.percentiles().to_vec();
        let n_buckets = self.engine.config().n_buckets();
        info!(
            n_lat,
            n_lon,
            n_years = n_time / DAYS_PER_YEAR,
            n_percentiles = percentiles.len(),
            parallel = self.parallel,
            "starting grid sweep"
        );

        let points: Vec<(usize, usize)> = (0..n_lat)
            .flat_map(|i| (0..n_lon).map(move |j| (i, j)))
            .collect();
        let completed = AtomicUsize::new(0);
        let run_point = |&(i, j): &(usize, usize)| {
            let result = self.process_point(field, i, j);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            progress(done, total);
            if self.progress_interval > 0 && (done % self.progress_interval == 0 || done == total) {
                info!(completed = done, total, "grid sweep progress");
            }
            result
        };

        let results: Vec<Result<Vec<DurationCounts>, String>> = if self.parallel {
            points.par_iter().map(run_point).collect()
        } else {
            points.iter().map(run_point).collect()
        };

        let mut counts = Array4::<i64>::zeros((percentiles.len(), n_lat, n_lon, n_buckets));
        let mut failed = Vec::new();
        for (&(i, j), result) in points.iter().zip(results) {
            match result {
                Ok(per_percentile) => {
                    for (k, hist) in per_percentile.iter().enumerate() {
                        let mut cell = counts.slice_mut(s![k, i, j, ..]);
                        for (c, &v) in cell.iter_mut().zip(hist.as_slice()) {
                            *c = v;
                        }
                    }
                }
                Err(reason) => {
                    debug!(lat_index = i, lon_index = j, %reason, "grid point failed");
                    failed.push(FailedPoint {
                        lat_index: i,
                        lon_index: j,
                        lat: field.lats()[i],
                        lon: field.lons()[j],
                        reason,
                    });
                }
            }
        }

        if !failed.is_empty() {
            warn!(n_failed = failed.len(), total, "grid points left at zero");
        }
        info!(total, n_failed = failed.len(), "grid sweep finished");

        Ok(GridHistogram::new(
            percentiles,
            field.lats().to_vec(),
            field.lons().to_vec(),
            self.engine.config().min_length(),
            counts,
            failed,
        ))
    }

    fn process_point(&self, field: &Field, i: usize, j: usize) -> Result<Vec<DurationCounts>, String> {
        let series = field.point_series(i, j);
        if series.iter().all(|v| v.is_nan()) {
            return Err("all values missing".to_string());
        }
        self.engine.duration_totals(&series).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use sre_events::PercentileSet;

    fn config() -> SreConfig {
        SreConfig::new()
            .with_percentiles(PercentileSet::List(vec![10, 90]))
            .with_lengths(3, 10)
    }

    fn field(nt: usize) -> Field {
        let values = Array3::from_shape_fn((nt, 2, 2), |(t, i, j)| {
            ((t * 7 + i * 13 + j * 29) % 101) as f64
        });
        Field::new(values, vec![0.0, 1.0], vec![0.0, 1.0]).unwrap()
    }

    #[test]
    fn rejects_partial_years() {
        let b = GridMapBuilder::new(config()).unwrap();
        let err = b.build(&field(400)).unwrap_err();
        assert_eq!(err, MapError::Events(EventsError::InvalidLength { len: 400 }));
    }

    #[test]
    fn progress_reaches_total() {
        let b = GridMapBuilder::new(config()).unwrap().with_parallel(false);
        let calls = AtomicUsize::new(0);
        let last = AtomicUsize::new(0);
        b.build_with_progress(&field(730), |done, total| {
            assert_eq!(total, 4);
            calls.fetch_add(1, Ordering::Relaxed);
            last.store(done, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 4);
        assert_eq!(last.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn cells_match_single_series_engine() {
        let f = field(1095);
        let b = GridMapBuilder::new(config()).unwrap();
        let map = b.build(&f).unwrap();
        let engine = SreEngine::new(config()).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let expected = engine.duration_totals(&f.point_series(i, j)).unwrap();
                for (k, &p) in map.percentiles().iter().enumerate() {
                    assert_eq!(
                        map.cell(p, i, j).unwrap().to_vec(),
                        expected[k].as_slice().to_vec()
                    );
                }
            }
        }
    }
}
