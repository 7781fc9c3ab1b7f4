//! Day-of-year newtype and month tables for the 365-day calendar.

use crate::error::CalendarError;

/// Number of days in every year of the calendar.
pub const DAYS_PER_YEAR: usize = 365;

/// Day-of-year in the 365-day calendar (1..=365).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

/// Number of days in each month (index 0 unused, index 1 = January, ..., index 12 = December).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year on which each month starts (index 0 unused, index 1 = January starts at DOY 1, ...).
pub(crate) const MONTH_START_DOY: [u16; 13] =
    [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

impl Doy {
    /// Creates a new `Doy` from a 1-based day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=365.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=365).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Creates a `Doy` from a 0-based array index (0..=364).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `index` is 365 or more.
    pub fn from_index(index: usize) -> Result<Self, CalendarError> {
        if index >= DAYS_PER_YEAR {
            return Err(CalendarError::InvalidDoy {
                doy: u16::try_from(index + 1).unwrap_or(u16::MAX),
            });
        }
        // index < 365 fits in u16.
        Ok(Self(index as u16 + 1))
    }

    /// Creates a new `Doy` from a (month, day) pair.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    /// Returns [`CalendarError::InvalidDay`] if `day` is not valid for the given month.
    pub fn from_month_day(month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = DAYS_PER_MONTH[month as usize];
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self(MONTH_START_DOY[month as usize] + day as u16 - 1))
    }

    /// Returns the inner day-of-year value (1..=365).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index into a 365-day year (0..=364).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Returns the month (1..=12) containing this day.
    pub fn month(self) -> u8 {
        // Last month whose start is not after this day.
        let pos = MONTH_START_DOY[1..].partition_point(|&start| start <= self.0);
        pos as u8
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        (self.0 - MONTH_START_DOY[self.month() as usize] + 1) as u8
    }

    /// Returns the `(month, day)` pair for this day-of-year.
    pub fn month_day(self) -> (u8, u8) {
        (self.month(), self.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bounds() {
        assert_eq!(Doy::new(1).unwrap().get(), 1);
        assert_eq!(Doy::new(365).unwrap().get(), 365);
        assert_eq!(
            Doy::new(0).unwrap_err(),
            CalendarError::InvalidDoy { doy: 0 }
        );
        assert_eq!(
            Doy::new(366).unwrap_err(),
            CalendarError::InvalidDoy { doy: 366 }
        );
    }

    #[test]
    fn from_index_round_trips() {
        for i in 0..DAYS_PER_YEAR {
            assert_eq!(Doy::from_index(i).unwrap().index(), i);
        }
        assert!(Doy::from_index(365).is_err());
    }

    #[test]
    fn month_boundaries() {
        assert_eq!(Doy::new(1).unwrap().month_day(), (1, 1));
        assert_eq!(Doy::new(31).unwrap().month_day(), (1, 31));
        assert_eq!(Doy::new(32).unwrap().month_day(), (2, 1));
        assert_eq!(Doy::new(59).unwrap().month_day(), (2, 28));
        assert_eq!(Doy::new(60).unwrap().month_day(), (3, 1));
        assert_eq!(Doy::new(335).unwrap().month_day(), (12, 1));
        assert_eq!(Doy::new(365).unwrap().month_day(), (12, 31));
    }

    #[test]
    fn from_month_day_rejects_feb_29() {
        assert_eq!(
            Doy::from_month_day(2, 29).unwrap_err(),
            CalendarError::InvalidDay {
                day: 29,
                month: 2,
                max_day: 28,
            }
        );
    }

    #[test]
    fn from_month_day_rejects_month_13() {
        assert_eq!(
            Doy::from_month_day(13, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn roundtrip_all_365() {
        for d in 1..=365u16 {
            let doy = Doy::new(d).unwrap();
            let (m, day) = doy.month_day();
            assert_eq!(
                Doy::from_month_day(m, day).unwrap(),
                doy,
                "roundtrip failed for doy {d}: month_day=({m}, {day})"
            );
        }
    }

    #[test]
    fn table_integrity() {
        let total: u16 = DAYS_PER_MONTH[1..=12].iter().copied().map(u16::from).sum();
        assert_eq!(total as usize, DAYS_PER_YEAR);
        for m in 1..12usize {
            assert_eq!(
                MONTH_START_DOY[m] + DAYS_PER_MONTH[m] as u16,
                MONTH_START_DOY[m + 1],
                "MONTH_START_DOY mismatch at month {m}"
            );
        }
    }
}
