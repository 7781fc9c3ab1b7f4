//! Per-percentile SRE results.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::Serialize;
use sre_calendar::{DAYS_PER_YEAR, Season};
use sre_stats::nan_mean;

use crate::error::EventsError;
use crate::exceedance::Direction;
use crate::histogram::DurationCounts;
use crate::runs::run_means;

/// One detected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Index of the first day in the full series.
    pub start: usize,
    /// 0-based year of the first day.
    pub year: usize,
    /// 0-based calendar day of the first day.
    pub day: usize,
    /// Duration in days.
    pub length: usize,
}

/// Everything computed for one percentile.
#[derive(Debug, Clone)]
pub struct PercentileRecord {
    percentile: u8,
    direction: Direction,
    thresholds: Vec<f64>,
    exceedance: Vec<bool>,
    runs: Vec<usize>,
    per_day: Array2<i64>,
    min_length: usize,
}

impl PercentileRecord {
    pub(crate) fn new(
        percentile: u8,
        thresholds: Vec<f64>,
        exceedance: Vec<bool>,
        runs: Vec<usize>,
        per_day: Array2<i64>,
        min_length: usize,
    ) -> Self {
        Self {
            percentile,
            direction: Direction::for_percentile(percentile),
            thresholds,
            exceedance,
            runs,
            per_day,
            min_length,
        }
    }

    /// The percentile (1..=99).
    pub fn percentile(&self) -> u8 {
        self.percentile
    }

    /// Exceedance direction used for this percentile.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Calendar-day thresholds tiled over the full series.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// The 365 calendar-day thresholds.
    pub fn thresholds_one_year(&self) -> &[f64] {
        &self.thresholds[..DAYS_PER_YEAR]
    }

    /// Exceedance mask over the full series.
    pub fn exceedance(&self) -> &[bool] {
        &self.exceedance
    }

    /// Run-start lengths over the full series, after the minimum-length floor.
    pub fn runs(&self) -> &[usize] {
        &self.runs
    }

    /// `(365, max_length + 1)` counts of events by starting calendar day and
    /// duration.
    pub fn per_day(&self) -> &Array2<i64> {
        &self.per_day
    }

    /// Duration counts for events starting on one calendar day.
    ///
    /// # Panics
    ///
    /// Panics if `day >= 365`.
    pub fn day(&self, day: usize) -> ArrayView1<'_, i64> {
        self.per_day.row(day)
    }

    /// Number of days flagged in the exceedance mask.
    pub fn n_exceedance_days(&self) -> usize {
        self.exceedance.iter().filter(|&&e| e).count()
    }

    /// Duration counts summed over all calendar days.
    pub fn duration_totals(&self) -> DurationCounts {
        self.sum_days(0..DAYS_PER_YEAR)
    }

    /// Duration counts summed over the calendar days of each season.
    pub fn seasonal_counts(&self) -> BTreeMap<Season, DurationCounts> {
        Season::ALL
            .into_iter()
            .map(|season| {
                let days = season.day_ranges().iter().flat_map(|r| r.clone());
                (season, self.sum_days(days))
            })
            .collect()
    }

    /// All events that survived the minimum-length floor, in time order.
    ///
    /// Events longer than `max_length` are listed even though the histograms
    /// do not count them.
    pub fn events(&self) -> Vec<Event> {
        self.runs
            .iter()
            .enumerate()
            .filter(|&(_, &len)| len > 0)
            .map(|(start, &length)| Event {
                start,
                year: start / DAYS_PER_YEAR,
                day: start % DAYS_PER_YEAR,
                length,
            })
            .collect()
    }

    /// Mean of `series` over each event returned by [`events`](Self::events).
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::LengthMismatch`] if `series` is not the series
    /// this record was computed from.
    pub fn event_means(&self, series: &[f64]) -> Result<Vec<f64>, EventsError> {
        self.check_series(series)?;
        Ok(self
            .events()
            .iter()
            .map(|e| nan_mean(&series[e.start..e.start + e.length]))
            .collect())
    }

    /// Mean departure of `series` from the daily threshold over each event
    /// returned by [`events`](Self::events). Positive for upper-tail events,
    /// negative for lower-tail ones.
    ///
    /// # Errors
    ///
    /// Same as [`event_means`](Self::event_means).
    pub fn event_anomalies(&self, series: &[f64]) -> Result<Vec<f64>, EventsError> {
        self.check_series(series)?;
        let events = self.events();
        // Event days strictly exceed their threshold, so every departure inside
        // an event is non-zero and events stay separated by zeros.
        let mut departures = vec![0.0; series.len()];
        for e in &events {
            for t in e.start..e.start + e.length {
                departures[t] = series[t] - self.thresholds[t];
            }
        }
        let means = run_means(&departures);
        Ok(events.iter().map(|e| means[e.start]).collect())
    }

    fn check_series(&self, series: &[f64]) -> Result<(), EventsError> {
        if series.len() != self.runs.len() {
            return Err(EventsError::LengthMismatch {
                expected: self.runs.len(),
                got: series.len(),
            });
        }
        Ok(())
    }

    fn sum_days(&self, days: impl IntoIterator<Item = usize>) -> DurationCounts {
        let mut sum = Array1::<i64>::zeros(self.per_day.ncols());
        for d in days {
            sum += &self.per_day.index_axis(Axis(0), d);
        }
        DurationCounts::from_counts(self.min_length, sum.to_vec())
    }
}

/// Results for every analysed percentile of one series.
#[derive(Debug, Clone)]
pub struct SreOutput {
    n_years: usize,
    min_length: usize,
    max_length: usize,
    records: BTreeMap<u8, PercentileRecord>,
}

impl SreOutput {
    pub(crate) fn new(
        n_years: usize,
        min_length: usize,
        max_length: usize,
        records: BTreeMap<u8, PercentileRecord>,
    ) -> Self {
        Self {
            n_years,
            min_length,
            max_length,
            records,
        }
    }

    /// Number of years in the analysed series.
    pub fn n_years(&self) -> usize {
        self.n_years
    }

    /// Shortest reported duration.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Longest reported duration.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Record for one percentile, if it was analysed.
    pub fn get(&self, percentile: u8) -> Option<&PercentileRecord> {
        self.records.get(&percentile)
    }

    /// Analysed percentiles in ascending order.
    pub fn percentiles(&self) -> impl Iterator<Item = u8> + '_ {
        self.records.keys().copied()
    }

    /// `(percentile, record)` pairs in ascending percentile order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &PercentileRecord)> {
        self.records.iter().map(|(&p, r)| (p, r))
    }

    /// Number of analysed percentiles.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no percentile was analysed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
