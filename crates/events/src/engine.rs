//! The per-series SRE engine.

use std::collections::BTreeMap;

use ndarray::Array2;
use sre_calendar::DAYS_PER_YEAR;
use tracing::{debug, trace};

use crate::config::{MIN_EVENT_FLOOR, SreConfig};
use crate::error::EventsError;
use crate::exceedance::{Direction, exceedance_mask};
use crate::histogram::{DurationCounts, count_occurrences};
use crate::reshape::{ReshapedSeries, reshape};
use crate::result::{PercentileRecord, SreOutput};
use crate::runs::{apply_floor, encode_runs};
use crate::threshold::{SortedColumns, tile_thresholds};

/// Runs SRE detection on daily series with a fixed, validated configuration.
///
/// Each percentile is processed independently: thresholds, exceedance mask,
/// run encoding, the [`MIN_EVENT_FLOOR`] filter, then one duration histogram
/// per calendar day built from that day's run-encoding values across years.
#[derive(Debug, Clone)]
pub struct SreEngine {
    config: SreConfig,
    percentiles: Vec<u8>,
}

impl SreEngine {
    /// Validates `config` and resolves its percentile set.
    ///
    /// # Errors
    ///
    /// Any error from [`SreConfig::validate`].
    pub fn new(config: SreConfig) -> Result<Self, EventsError> {
        config.validate()?;
        let percentiles = config.percentiles().resolve();
        Ok(Self {
            config,
            percentiles,
        })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SreConfig {
        &self.config
    }

    /// Resolved percentiles, ascending.
    pub fn percentiles(&self) -> &[u8] {
        &self.percentiles
    }

    /// Full analysis of one series, keeping every intermediate per percentile.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::EmptySeries`] or [`EventsError::InvalidLength`]
    /// before any computation if `series` does not hold whole years.
    pub fn run(&self, series: &[f64]) -> Result<SreOutput, EventsError> {
        let reshaped = reshape(series)?;
        let sorted = SortedColumns::new(&reshaped);
        debug!(
            n_years = reshaped.n_years(),
            n_percentiles = self.percentiles.len(),
            min_length = self.config.min_length(),
            max_length = self.config.max_length(),
            "detecting sustained radiation events"
        );

        let mut records = BTreeMap::new();
        for &p in &self.percentiles {
            let record = self.analyse_percentile(&reshaped, &sorted, p)?;
            trace!(
                percentile = p,
                n_events = record.duration_totals().n_events(),
                "percentile done"
            );
            records.insert(p, record);
        }

        Ok(SreOutput::new(
            reshaped.n_years(),
            self.config.min_length(),
            self.config.max_length(),
            records,
        ))
    }

    /// Duration histograms summed over calendar days, one per resolved
    /// percentile in ascending order.
    ///
    /// Equivalent to `run(series)` followed by
    /// [`PercentileRecord::duration_totals`] for every percentile, without
    /// keeping the per-day intermediates. Used by the grid sweep.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn duration_totals(&self, series: &[f64]) -> Result<Vec<DurationCounts>, EventsError> {
        let reshaped = reshape(series)?;
        let sorted = SortedColumns::new(&reshaped);
        let (min_length, max_length) = (self.config.min_length(), self.config.max_length());

        Ok(self
            .percentiles
            .iter()
            .map(|&p| {
                let runs = self.floored_runs(series, &sorted, p);
                let mut totals = DurationCounts::zeros(min_length, max_length);
                for day in 0..DAYS_PER_YEAR {
                    let samples = runs.iter().skip(day).step_by(DAYS_PER_YEAR).copied();
                    totals.accumulate(&count_occurrences(samples, min_length, max_length));
                }
                totals
            })
            .collect())
    }

    fn analyse_percentile(
        &self,
        reshaped: &ReshapedSeries<'_>,
        sorted: &SortedColumns,
        percentile: u8,
    ) -> Result<PercentileRecord, EventsError> {
        let series = reshaped.as_slice();
        let one_year = sorted.thresholds(f64::from(percentile));
        let thresholds = tile_thresholds(&one_year, reshaped.n_years());
        let mask = exceedance_mask(series, &thresholds, Direction::for_percentile(percentile))?;
        let mut runs = encode_runs(&mask);
        apply_floor(&mut runs, MIN_EVENT_FLOOR);
        let per_day = self.per_day_stats(&runs);

        Ok(PercentileRecord::new(
            percentile,
            thresholds,
            mask,
            runs,
            per_day,
            self.config.min_length(),
        ))
    }

    /// Run encoding after the floor filter, computed without materialising
    /// tiled thresholds.
    fn floored_runs(&self, series: &[f64], sorted: &SortedColumns, percentile: u8) -> Vec<usize> {
        let one_year = sorted.thresholds(f64::from(percentile));
        let direction = Direction::for_percentile(percentile);
        let mask: Vec<bool> = series
            .iter()
            .enumerate()
            .map(|(i, &v)| direction.exceeds(v, one_year[i % DAYS_PER_YEAR]))
            .collect();
        let mut runs = encode_runs(&mask);
        apply_floor(&mut runs, MIN_EVENT_FLOOR);
        runs
    }

    /// `(365, max_length + 1)` histograms, row `d` built from
    /// `runs[d], runs[d + 365], ...`.
    fn per_day_stats(&self, runs: &[usize]) -> Array2<i64> {
        let (min_length, max_length) = (self.config.min_length(), self.config.max_length());
        let mut per_day = Array2::<i64>::zeros((DAYS_PER_YEAR, max_length + 1));
        for (day, mut row) in per_day.outer_iter_mut().enumerate() {
            let samples = runs.iter().skip(day).step_by(DAYS_PER_YEAR).copied();
            let hist = count_occurrences(samples, min_length, max_length);
            for (cell, &count) in row.iter_mut().zip(hist.as_slice()) {
                *cell = count;
            }
        }
        per_day
    }
}

/// One-shot convenience: validate `config` and analyse `series`.
///
/// # Errors
///
/// Any error from [`SreEngine::new`] or [`SreEngine::run`].
pub fn compute_sres(series: &[f64], config: &SreConfig) -> Result<SreOutput, EventsError> {
    SreEngine::new(config.clone())?.run(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PercentileSet;

    fn two_years_with_spike() -> Vec<f64> {
        let mut s = vec![1.0; 730];
        s[100..105].fill(10.0);
        s
    }

    fn engine(percentiles: Vec<u8>) -> SreEngine {
        SreEngine::new(
            SreConfig::new()
                .with_percentiles(PercentileSet::List(percentiles))
                .with_lengths(3, 10),
        )
        .unwrap()
    }

    #[test]
    fn rejects_partial_years_before_computing() {
        let e = engine(vec![95]);
        let err = e.run(&vec![1.0; 400]).unwrap_err();
        assert_eq!(err, EventsError::InvalidLength { len: 400 });
        assert_eq!(e.run(&[]).unwrap_err(), EventsError::EmptySeries);
    }

    #[test]
    fn new_validates_config() {
        let bad = SreConfig::new().with_lengths(5, 2);
        assert!(SreEngine::new(bad).is_err());
    }

    #[test]
    fn spike_detected_at_upper_percentile() {
        let out = engine(vec![95]).run(&two_years_with_spike()).unwrap();
        let rec = out.get(95).unwrap();
        assert_eq!(rec.direction(), Direction::Above);
        assert_eq!(rec.runs()[100], 5);
        assert_eq!(rec.runs().iter().filter(|&&r| r > 0).count(), 1);
        assert_eq!(rec.per_day()[[100, 5]], 1);
        assert_eq!(rec.per_day().sum(), 1);
    }

    #[test]
    fn duration_totals_match_full_run() {
        let s = two_years_with_spike();
        let e = engine(vec![5, 50, 95]);
        let out = e.run(&s).unwrap();
        let totals = e.duration_totals(&s).unwrap();
        for (t, (_, rec)) in totals.iter().zip(out.iter()) {
            assert_eq!(t, &rec.duration_totals());
        }
    }

    #[test]
    fn compute_sres_wraps_engine() {
        let s = two_years_with_spike();
        let config = SreConfig::new()
            .with_percentiles(PercentileSet::List(vec![95]))
            .with_lengths(3, 10);
        let out = compute_sres(&s, &config).unwrap();
        assert_eq!(out.percentiles().collect::<Vec<_>>(), vec![95]);
    }
}
