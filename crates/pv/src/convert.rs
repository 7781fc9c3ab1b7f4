//! Year-by-year conversion of long series.

use sre_events::reshape;
use tracing::{debug, trace};

use crate::error::PvError;
use crate::model::PvModel;
use crate::panel::{PanelConfig, Site};

/// Daily PV energy for a whole multi-year irradiance series.
///
/// The series is split into 365-day years and each year is converted with
/// `model`; the result has the same length as `series`.
///
/// # Errors
///
/// Returns [`PvError::Events`] if `series` is empty or not a whole number of
/// years, [`PvError::InvalidParameter`] for an invalid panel or site, or any
/// error of the model.
pub fn pv_power_series(
    series: &[f64],
    model: &dyn PvModel,
    site: &Site,
    panel: &PanelConfig,
) -> Result<Vec<f64>, PvError> {
    panel.validate()?;
    site.validate()?;
    let years = reshape(series)?;
    debug!(
        model = model.name(),
        n_years = years.n_years(),
        tilt = panel.tilt(),
        azimuth = panel.azimuth(),
        tracking = ?panel.tracking(),
        "converting irradiance to pv energy"
    );

    let mut out = Vec::with_capacity(series.len());
    for (y, year) in years.years().enumerate() {
        out.extend(model.year_energy(year, site, panel)?);
        trace!(year = y, "year converted");
    }
    Ok(out)
}
