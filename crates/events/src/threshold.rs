//! Calendar-day percentile thresholds.
//!
//! For each of the 365 calendar days, the threshold is the percentile of that
//! day's values across all years, ignoring missing values. A day whose values
//! are all missing gets a `NaN` threshold, which never triggers an
//! exceedance.

use sre_calendar::DAYS_PER_YEAR;
use sre_stats::{nan_percentile_in_place, quantile_type7};

use crate::reshape::ReshapedSeries;

/// Per-calendar-day values sorted once, so thresholds for many percentiles
/// can be read off without re-sorting.
#[derive(Debug, Clone)]
pub struct SortedColumns {
    columns: Vec<Vec<f64>>,
}

impl SortedColumns {
    /// Collects and sorts the non-missing values of every calendar day.
    pub fn new(series: &ReshapedSeries<'_>) -> Self {
        let columns = (0..DAYS_PER_YEAR)
            .map(|day| {
                let mut col: Vec<f64> = series.column(day).filter(|v| !v.is_nan()).collect();
                col.sort_by(f64::total_cmp);
                col
            })
            .collect();
        Self { columns }
    }

    /// Threshold for one calendar day (`NaN` if that day has no data).
    pub fn threshold(&self, day: usize, percentile: f64) -> f64 {
        let col = &self.columns[day];
        if col.is_empty() {
            f64::NAN
        } else {
            quantile_type7(col, percentile / 100.0)
        }
    }

    /// 365-element threshold vector for one percentile.
    pub fn thresholds(&self, percentile: f64) -> Vec<f64> {
        (0..DAYS_PER_YEAR)
            .map(|day| self.threshold(day, percentile))
            .collect()
    }

    /// Number of non-missing values for a calendar day.
    pub fn n_valid(&self, day: usize) -> usize {
        self.columns[day].len()
    }
}

/// 365-element threshold vector: the `percentile` (0..=100) of each calendar
/// day's values across years.
pub fn calendar_thresholds(series: &ReshapedSeries<'_>, percentile: f64) -> Vec<f64> {
    let mut scratch = Vec::with_capacity(series.n_years());
    (0..DAYS_PER_YEAR)
        .map(|day| {
            scratch.clear();
            scratch.extend(series.column(day));
            nan_percentile_in_place(&mut scratch, percentile)
        })
        .collect()
}

/// Repeats a one-year threshold vector `n_years` times.
pub fn tile_thresholds(one_year: &[f64], n_years: usize) -> Vec<f64> {
    one_year.repeat(n_years)
}
