//! Grid-wide duration histograms.

use ndarray::{Array2, Array4, ArrayView1, Axis, s};
use serde::Serialize;

/// A grid point whose series could not be analysed.
///
/// Its histogram cells stay all-zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedPoint {
    /// Row in the latitude axis.
    pub lat_index: usize,
    /// Column in the longitude axis.
    pub lon_index: usize,
    /// Latitude of the point, in degrees.
    pub lat: f64,
    /// Longitude of the point, in degrees.
    pub lon: f64,
    /// Why the point was skipped.
    pub reason: String,
}

/// Event counts by percentile, grid point and duration.
///
/// `counts[[k, i, j, d]]` is the number of events of exactly `d` days at
/// `(lats[i], lons[j])` for `percentiles[k]`, summed over all calendar days.
#[derive(Debug, Clone)]
pub struct GridHistogram {
    percentiles: Vec<u8>,
    lats: Vec<f64>,
    lons: Vec<f64>,
    min_length: usize,
    counts: Array4<i64>,
    failed: Vec<FailedPoint>,
}

impl GridHistogram {
    pub(crate) fn new(
        percentiles: Vec<u8>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        min_length: usize,
        counts: Array4<i64>,
        failed: Vec<FailedPoint>,
    ) -> Self {
        Self {
            percentiles,
            lats,
            lons,
            min_length,
            counts,
            failed,
        }
    }

    /// Analysed percentiles, ascending; index `k` of the first axis.
    pub fn percentiles(&self) -> &[u8] {
        &self.percentiles
    }

    /// Latitude coordinates.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude coordinates.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Shortest counted duration.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Longest counted duration.
    pub fn max_length(&self) -> usize {
        self.counts.dim().3 - 1
    }

    /// The full `(n_percentiles, n_lat, n_lon, max_length + 1)` array.
    pub fn counts(&self) -> &Array4<i64> {
        &self.counts
    }

    /// Points that failed and were left at zero, in row-major order.
    pub fn failed(&self) -> &[FailedPoint] {
        &self.failed
    }

    /// Whether every grid point was analysed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Duration counts at one grid point for one percentile.
    pub fn cell(&self, percentile: u8, lat_index: usize, lon_index: usize) -> Option<ArrayView1<'_, i64>> {
        let k = self.position(percentile)?;
        if lat_index >= self.lats.len() || lon_index >= self.lons.len() {
            return None;
        }
        Some(self.counts.slice(s![k, lat_index, lon_index, ..]))
    }

    /// Number of events per grid point for one percentile, over durations
    /// `max(min_length, 1)..=max_length`.
    pub fn event_map(&self, percentile: u8) -> Option<Array2<i64>> {
        let k = self.position(percentile)?;
        let first = self.min_length.max(1).min(self.counts.dim().3);
        Some(
            self.counts
                .slice(s![k, .., .., first..])
                .sum_axis(Axis(2)),
        )
    }

    fn position(&self, percentile: u8) -> Option<usize> {
        self.percentiles.iter().position(|&p| p == percentile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridHistogram {
        let mut counts = Array4::<i64>::zeros((2, 1, 2, 6));
        counts[[1, 0, 1, 4]] = 3;
        counts[[1, 0, 1, 5]] = 1;
        counts[[1, 0, 1, 0]] = 100;
        GridHistogram::new(vec![5, 95], vec![45.0], vec![0.0, 10.0], 0, counts, Vec::new())
    }

    #[test]
    fn cell_lookup() {
        let g = sample();
        assert_eq!(g.cell(95, 0, 1).unwrap().to_vec(), vec![100, 0, 0, 0, 3, 1]);
        assert!(g.cell(50, 0, 0).is_none());
        assert!(g.cell(95, 1, 0).is_none());
        assert_eq!(g.max_length(), 5);
    }

    #[test]
    fn event_map_skips_bucket_zero() {
        let g = sample();
        let m = g.event_map(95).unwrap();
        assert_eq!(m.dim(), (1, 2));
        assert_eq!(m[[0, 0]], 0);
        assert_eq!(m[[0, 1]], 4);
        assert!(g.is_complete());
    }
}
