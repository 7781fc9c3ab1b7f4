//! # sre-pv
//!
//! Converts daily mean surface irradiance (W/m²) into daily photovoltaic
//! energy (Wh/day), one 365-day year at a time.
//!
//! The conversion itself sits behind the [`PvModel`] trait so that a
//! physical model can be plugged in. [`PerformanceRatioModel`] is a simple
//! baseline.
//!
//! ```
//! use sre_pv::{PanelConfig, PerformanceRatioModel, Site, pv_power_series};
//!
//! let irradiance = vec![200.0; 730];
//! let model = PerformanceRatioModel::default();
//! let energy = pv_power_series(&irradiance, &model, &Site::new(47.4, 8.5), &PanelConfig::default()).unwrap();
//! assert_eq!(energy.len(), 730);
//! ```

mod convert;
mod error;
mod model;
mod panel;

pub use convert::pv_power_series;
pub use error::PvError;
pub use model::{PerformanceRatioModel, PvModel, check_year};
pub use panel::{PanelConfig, Site, Tracking};
