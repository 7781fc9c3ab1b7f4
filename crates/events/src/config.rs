//! Configuration for SRE detection.

use serde::{Deserialize, Serialize};

use crate::error::EventsError;

/// Shortest run, in days, that ever counts as an event.
///
/// Runs shorter than this are discarded inside the engine regardless of the
/// configured `min_length`, so histogram buckets below it are always empty.
pub const MIN_EVENT_FLOOR: usize = 3;

/// Largest accepted `max_length`; durations are stored as `u16` downstream.
pub const MAX_EVENT_LENGTH: usize = u16::MAX as usize;

/// Which percentiles to analyse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentileSet {
    /// Every integer percentile from 1 to 99.
    All,
    /// An explicit list, analysed in ascending order.
    List(Vec<u8>),
}

impl PercentileSet {
    /// The percentiles to analyse, sorted and deduplicated.
    pub fn resolve(&self) -> Vec<u8> {
        match self {
            PercentileSet::All => (1..=99).collect(),
            PercentileSet::List(list) => {
                let mut v = list.clone();
                v.sort_unstable();
                v.dedup();
                v
            }
        }
    }
}

/// Configuration for [`SreEngine`](crate::SreEngine).
///
/// # Example
///
/// ```
/// use sre_events::{PercentileSet, SreConfig};
///
/// let config = SreConfig::new()
///     .with_percentiles(PercentileSet::List(vec![5, 95]))
///     .with_lengths(3, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SreConfig {
    percentiles: PercentileSet,
    min_length: usize,
    max_length: usize,
}

impl Default for SreConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SreConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: all percentiles 1..=99, `min_length = 3`, `max_length = 16`.
    pub fn new() -> Self {
        Self {
            percentiles: PercentileSet::All,
            min_length: 3,
            max_length: 16,
        }
    }

    /// Sets the percentiles to analyse.
    pub fn with_percentiles(mut self, percentiles: PercentileSet) -> Self {
        self.percentiles = percentiles;
        self
    }

    /// Sets the inclusive range of event durations reported in histograms.
    pub fn with_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Percentile selection.
    pub fn percentiles(&self) -> &PercentileSet {
        &self.percentiles
    }

    /// Shortest reported duration.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Longest reported duration.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Number of duration buckets (`max_length + 1`).
    pub fn n_buckets(&self) -> usize {
        self.max_length + 1
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::NoPercentiles`] for an empty list,
    /// [`EventsError::InvalidPercentile`] for a percentile outside 1..=99, or
    /// [`EventsError::InvalidLengthRange`] if `min_length > max_length`, or
    /// [`EventsError::MaxLengthTooLarge`] if `max_length` exceeds
    /// [`MAX_EVENT_LENGTH`].
    pub fn validate(&self) -> Result<(), EventsError> {
        if let PercentileSet::List(list) = &self.percentiles {
            if list.is_empty() {
                return Err(EventsError::NoPercentiles);
            }
            if let Some(&percentile) = list.iter().find(|p| !(1..=99).contains(*p)) {
                return Err(EventsError::InvalidPercentile { percentile });
            }
        }
        if self.min_length > self.max_length {
            return Err(EventsError::InvalidLengthRange {
                min_length: self.min_length,
                max_length: self.max_length,
            });
        }
        if self.max_length > MAX_EVENT_LENGTH {
            return Err(EventsError::MaxLengthTooLarge {
                max_length: self.max_length,
                limit: MAX_EVENT_LENGTH,
            });
        }
        Ok(())
    }
}
