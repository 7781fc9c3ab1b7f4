//! Parsing of `dd-mm` calendar strings.

use crate::doy::Doy;
use crate::error::CalendarError;

/// Converts a `dd-mm` string (exactly two digits, a dash, two digits) into a
/// 0-based day index in the 365-day calendar.
///
/// `"01-01"` maps to 0 and `"31-12"` to 364.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDateFormat`] if the string is not of the
/// form `dd-mm`, or [`CalendarError::InvalidMonth`] /
/// [`CalendarError::InvalidDay`] for dates that do not exist in the calendar
/// (including 29 February).
pub fn day_index_from_str(date: &str) -> Result<usize, CalendarError> {
    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b'-'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return Err(CalendarError::InvalidDateFormat {
            input: date.to_string(),
        });
    }

    let digit = |i: usize| bytes[i] - b'0';
    let day = digit(0) * 10 + digit(1);
    let month = digit(3) * 10 + digit(4);

    Ok(Doy::from_month_day(month, day)?.index())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_boundaries() {
        assert_eq!(day_index_from_str("01-01").unwrap(), 0);
        assert_eq!(day_index_from_str("31-12").unwrap(), 364);
    }

    #[test]
    fn parses_march_first() {
        assert_eq!(day_index_from_str("01-03").unwrap(), 59);
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["1-03", "01/03", "01-3", "aa-bb", "01-03-2000", ""] {
            assert!(
                matches!(
                    day_index_from_str(bad),
                    Err(CalendarError::InvalidDateFormat { .. })
                ),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn rejects_feb_29() {
        assert!(matches!(
            day_index_from_str("29-02"),
            Err(CalendarError::InvalidDay { day: 29, month: 2, .. })
        ));
    }

    #[test]
    fn rejects_month_zero() {
        assert!(matches!(
            day_index_from_str("10-00"),
            Err(CalendarError::InvalidMonth { month: 0 })
        ));
    }
}
