//! PV conversion models.

use sre_calendar::DAYS_PER_YEAR;

use crate::error::PvError;
use crate::panel::{PanelConfig, Site, Tracking};

/// Hours per day, converting a daily mean power to daily energy.
const HOURS_PER_DAY: f64 = 24.0;

/// Irradiance at which a panel delivers its rated capacity (W/m²).
const STC_IRRADIANCE: f64 = 1000.0;

/// Converts one year of daily mean irradiance into daily PV energy.
pub trait PvModel: Send + Sync {
    /// Short identifier used in logs and output names.
    fn name(&self) -> &str;

    /// Daily energy in Wh/day for one 365-day year of daily mean
    /// irradiance in W/m².
    ///
    /// # Errors
    ///
    /// Implementations return [`PvError::InvalidYearLength`] unless `year`
    /// holds exactly 365 values (see [`check_year`]).
    fn year_energy(&self, year: &[f64], site: &Site, panel: &PanelConfig) -> Result<Vec<f64>, PvError>;
}

/// Checks that `year` holds exactly one 365-day year.
///
/// # Errors
///
/// Returns [`PvError::InvalidYearLength`] otherwise.
pub fn check_year(year: &[f64]) -> Result<(), PvError> {
    if year.len() != DAYS_PER_YEAR {
        return Err(PvError::InvalidYearLength { len: year.len() });
    }
    Ok(())
}

/// Energy proportional to irradiance.
///
/// `energy = irradiance × 24 h × capacity / 1000 W/m² × performance ratio ×
/// tracking gain`. Ignores geometry, temperature and the inverter, so it is a
/// baseline, not a physical model. Negative irradiance yields zero; `NaN`
/// yields `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRatioModel {
    performance_ratio: f64,
}

impl Default for PerformanceRatioModel {
    fn default() -> Self {
        Self {
            performance_ratio: 0.8,
        }
    }
}

impl PerformanceRatioModel {
    /// # Errors
    ///
    /// Returns [`PvError::InvalidParameter`] unless `0 < ratio <= 1`.
    pub fn new(performance_ratio: f64) -> Result<Self, PvError> {
        if !(performance_ratio > 0.0 && performance_ratio <= 1.0) {
            return Err(PvError::InvalidParameter {
                field: "performance_ratio".to_string(),
                value: performance_ratio,
                reason: "must be within (0, 1]".to_string(),
            });
        }
        Ok(Self { performance_ratio })
    }

    pub fn performance_ratio(&self) -> f64 {
        self.performance_ratio
    }

    /// Nominal yield gain of a tracking mode over a fixed panel.
    pub fn tracking_gain(tracking: Tracking) -> f64 {
        match tracking {
            Tracking::Fixed => 1.0,
            Tracking::SingleAxis => 1.25,
            Tracking::DualAxis => 1.35,
        }
    }
}

impl PvModel for PerformanceRatioModel {
    fn name(&self) -> &str {
        "performance_ratio"
    }

    fn year_energy(&self, year: &[f64], _site: &Site, panel: &PanelConfig) -> Result<Vec<f64>, PvError> {
        check_year(year)?;
        let factor = HOURS_PER_DAY * panel.capacity_w() / STC_IRRADIANCE
            * self.performance_ratio
            * Self::tracking_gain(panel.tracking());
        Ok(year
            .iter()
            .map(|&g| if g.is_nan() { f64::NAN } else { g.max(0.0) * factor })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn energy_formula() {
        let m = PerformanceRatioModel::default();
        let panel = PanelConfig::default();
        let out = m.year_energy(&vec![250.0; 365], &Site::new(0.0, 0.0), &panel).unwrap();
        // 250 W/m² × 24 h × 1 kWp/1000 × 0.8
        assert_relative_eq!(out[0], 4800.0);
    }

    #[test]
    fn tracking_scales_output() {
        let m = PerformanceRatioModel::new(1.0).unwrap();
        let site = Site::new(0.0, 0.0);
        let year = vec![100.0; 365];
        let fixed = m.year_energy(&year, &site, &PanelConfig::default()).unwrap();
        let dual = m
            .year_energy(&year, &site, &PanelConfig::default().with_tracking(Tracking::DualAxis))
            .unwrap();
        assert_relative_eq!(dual[0] / fixed[0], 1.35);
    }

    #[test]
    fn clamps_negative_and_keeps_nan() {
        let m = PerformanceRatioModel::default();
        let mut year = vec![100.0; 365];
        year[0] = -5.0;
        year[1] = f64::NAN;
        let out = m.year_energy(&year, &Site::new(0.0, 0.0), &PanelConfig::default()).unwrap();
        assert_eq!(out[0], 0.0);
        assert!(out[1].is_nan());
    }

    #[test]
    fn wrong_length_rejected() {
        let m = PerformanceRatioModel::default();
        let err = m
            .year_energy(&[1.0; 10], &Site::new(0.0, 0.0), &PanelConfig::default())
            .unwrap_err();
        assert_eq!(err, PvError::InvalidYearLength { len: 10 });
    }

    #[test]
    fn performance_ratio_bounds() {
        assert!(PerformanceRatioModel::new(0.0).is_err());
        assert!(PerformanceRatioModel::new(1.1).is_err());
        assert!(PerformanceRatioModel::new(f64::NAN).is_err());
        assert_relative_eq!(PerformanceRatioModel::new(0.75).unwrap().performance_ratio(), 0.75);
    }
}
