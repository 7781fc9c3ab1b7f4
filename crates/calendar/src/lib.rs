//! # sre-calendar
//!
//! Day-of-year arithmetic for the 365-day calendar used by daily climate-model
//! output (leap days are never present).
//!
//! ## Quick Start
//!
//! ```
//! use sre_calendar::{Doy, Season, day_index_from_str, seasonal_masks};
//!
//! // "dd-mm" strings map to 0-based day indices
//! assert_eq!(day_index_from_str("01-03").unwrap(), 59);
//!
//! // Day-of-year conversions
//! let doy = Doy::from_month_day(3, 15).unwrap();
//! assert_eq!(doy.get(), 74);
//! assert_eq!(Season::of_index(doy.index()), Season::Spring);
//!
//! // Seasonal masks tiled over two years
//! let masks = seasonal_masks(2);
//! assert_eq!(masks.get(Season::Winter).len(), 730);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype and month tables |
//! | `parse` | `dd-mm` string parsing |
//! | `season` | Meteorological seasons and repeating masks |
//! | `error` | Error types |

mod doy;
mod error;
mod parse;
mod season;

pub use doy::{DAYS_PER_YEAR, Doy};
pub use error::CalendarError;
pub use parse::day_index_from_str;
pub use season::{Season, SeasonalMasks, seasonal_masks};
