//! Meteorological seasons and yearly-repeating season masks.

use std::ops::Range;

use crate::doy::DAYS_PER_YEAR;

/// One of the four fixed meteorological seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    /// December, January and February.
    Winter,
    /// March, April and May.
    Spring,
    /// June, July and August.
    Summer,
    /// September, October and November.
    Autumn,
}

impl Season {
    /// All seasons, in mask order.
    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
    ];

    /// Lower-case name of the season.
    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }

    /// 0-based day ranges covered by the season within one year.
    ///
    /// Winter wraps around the year end and therefore has two ranges.
    pub fn day_ranges(self) -> &'static [Range<usize>] {
        static WINTER: [Range<usize>; 2] = [0..59, 334..DAYS_PER_YEAR];
        static SPRING: [Range<usize>; 1] = [59..152];
        static SUMMER: [Range<usize>; 1] = [152..244];
        static AUTUMN: [Range<usize>; 1] = [244..334];
        match self {
            Season::Winter => &WINTER,
            Season::Spring => &SPRING,
            Season::Summer => &SUMMER,
            Season::Autumn => &AUTUMN,
        }
    }

    /// Season containing the 0-based day index (taken modulo 365).
    pub fn of_index(day_index: usize) -> Season {
        let day = day_index % DAYS_PER_YEAR;
        Season::ALL
            .into_iter()
            .find(|s| s.day_ranges().iter().any(|r| r.contains(&day)))
            .unwrap_or(Season::Winter)
    }

    /// Whether the 0-based day index (taken modulo 365) lies in this season.
    pub fn contains(self, day_index: usize) -> bool {
        Season::of_index(day_index) == self
    }

    /// Number of days in the season.
    pub fn n_days(self) -> usize {
        self.day_ranges().iter().map(|r| r.len()).sum()
    }
}

/// Boolean season masks tiled over a multi-year daily series.
#[derive(Debug, Clone)]
pub struct SeasonalMasks {
    n_years: usize,
    masks: [Vec<bool>; 4],
}

impl SeasonalMasks {
    /// Mask for one season, `n_years * 365` long.
    pub fn get(&self, season: Season) -> &[bool] {
        &self.masks[season as usize]
    }

    /// Number of years the masks cover.
    pub fn n_years(&self) -> usize {
        self.n_years
    }

    /// Iterator over `(season, mask)` pairs in Winter, Spring, Summer, Autumn order.
    pub fn iter(&self) -> impl Iterator<Item = (Season, &[bool])> {
        Season::ALL
            .into_iter()
            .map(move |s| (s, self.masks[s as usize].as_slice()))
    }
}

/// Builds the four season masks for a series of `n_years` 365-day years.
///
/// Each mask is `true` on the days of its season and `false` elsewhere; every
/// day belongs to exactly one season.
pub fn seasonal_masks(n_years: usize) -> SeasonalMasks {
    let masks = Season::ALL.map(|season| {
        let mut one_year = vec![false; DAYS_PER_YEAR];
        for range in season.day_ranges() {
            one_year[range.clone()].fill(true);
        }
        one_year.repeat(n_years)
    });
    SeasonalMasks { n_years, masks }
}
