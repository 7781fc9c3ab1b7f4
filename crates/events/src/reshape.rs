//! Year × day-of-year view of a daily series.

use sre_calendar::DAYS_PER_YEAR;

use crate::error::EventsError;

/// A daily series viewed as an `(n_years, 365)` row-major grid.
///
/// Row `y` is year `y`; column `d` is the 0-based day of year.
#[derive(Debug, Clone, Copy)]
pub struct ReshapedSeries<'a> {
    data: &'a [f64],
    n_years: usize,
}

impl<'a> ReshapedSeries<'a> {
    /// Wraps `data` after checking that it holds whole 365-day years.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::EmptySeries`] if `data` is empty, or
    /// [`EventsError::InvalidLength`] if its length is not a multiple of 365.
    pub fn new(data: &'a [f64]) -> Result<Self, EventsError> {
        if data.is_empty() {
            return Err(EventsError::EmptySeries);
        }
        if data.len() % DAYS_PER_YEAR != 0 {
            return Err(EventsError::InvalidLength { len: data.len() });
        }
        Ok(Self {
            data,
            n_years: data.len() / DAYS_PER_YEAR,
        })
    }

    /// Number of years (rows).
    pub fn n_years(&self) -> usize {
        self.n_years
    }

    /// Shape as `(n_years, 365)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_years, DAYS_PER_YEAR)
    }

    /// The underlying flat series.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// One year of data.
    ///
    /// # Panics
    ///
    /// Panics if `year >= n_years`.
    pub fn year(&self, year: usize) -> &'a [f64] {
        &self.data[year * DAYS_PER_YEAR..(year + 1) * DAYS_PER_YEAR]
    }

    /// Iterator over the years.
    pub fn years(&self) -> impl Iterator<Item = &'a [f64]> + 'a {
        self.data.chunks_exact(DAYS_PER_YEAR)
    }

    /// Values of one calendar day across all years.
    pub fn column(&self, day: usize) -> impl Iterator<Item = f64> + 'a {
        self.data.iter().skip(day).step_by(DAYS_PER_YEAR).copied()
    }
}

/// Reshapes a daily series into an `(n_years, 365)` view.
///
/// # Errors
///
/// See [`ReshapedSeries::new`].
pub fn reshape(data: &[f64]) -> Result<ReshapedSeries<'_>, EventsError> {
    ReshapedSeries::new(data)
}
