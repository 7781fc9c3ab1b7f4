//! Duration histograms of run-start lengths.

use serde::Serialize;

/// Count of run-starts per exact duration, indexed `0..=max_length`.
///
/// Buckets outside `[min_length, max_length]` stay at zero, except bucket 0
/// when `min_length == 0`, which counts non-event days (see
/// [`count_occurrences`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationCounts {
    counts: Vec<i64>,
    min_length: usize,
}

impl DurationCounts {
    /// An all-zero histogram with `max_length + 1` buckets.
    pub fn zeros(min_length: usize, max_length: usize) -> Self {
        Self {
            counts: vec![0; max_length + 1],
            min_length,
        }
    }

    pub(crate) fn from_counts(min_length: usize, counts: Vec<i64>) -> Self {
        Self { counts, min_length }
    }

    /// Bucket counts, index = duration in days.
    pub fn as_slice(&self) -> &[i64] {
        &self.counts
    }

    /// Consumes the histogram, returning the bucket counts.
    pub fn into_vec(self) -> Vec<i64> {
        self.counts
    }

    /// Count for one duration (0 if beyond `max_length`).
    pub fn get(&self, length: usize) -> i64 {
        self.counts.get(length).copied().unwrap_or(0)
    }

    /// Longest duration tracked.
    pub fn max_length(&self) -> usize {
        self.counts.len() - 1
    }

    /// Shortest duration tracked.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Number of events, i.e. the sum over buckets `max(min_length, 1)..=max_length`.
    pub fn n_events(&self) -> i64 {
        self.counts[self.min_length.max(1).min(self.counts.len())..]
            .iter()
            .sum()
    }

    /// Adds another histogram bucket by bucket.
    ///
    /// # Panics
    ///
    /// Panics if the two histograms have a different number of buckets.
    pub fn accumulate(&mut self, other: &DurationCounts) {
        assert_eq!(
            self.counts.len(),
            other.counts.len(),
            "accumulate: bucket count mismatch"
        );
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
    }
}

/// Buckets run-start lengths into a [`DurationCounts`] over
/// `[min_length, max_length]`.
///
/// When `min_length == 0` bucket 0 also receives every zero, which
/// over-counts "no event" days: each run of length `i` leaves `i - 1` zeroed
/// continuation days. Those are removed by subtracting `count[i] * (i - 1)`
/// from bucket 0 for every `i` in `2..=max_length`. The correction only runs
/// for `min_length == 0`.
pub fn count_occurrences<I>(values: I, min_length: usize, max_length: usize) -> DurationCounts
where
    I: IntoIterator<Item = usize>,
{
    let mut hist = DurationCounts::zeros(min_length, max_length);
    for v in values {
        if (min_length..=max_length).contains(&v) {
            hist.counts[v] += 1;
        }
    }

    if min_length == 0 {
        for i in 2..=max_length {
            hist.counts[0] -= hist.counts[i] * (i as i64 - 1);
        }
    }

    hist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_within_range_only() {
        let h = count_occurrences([0, 3, 3, 5, 12, 2], 3, 10);
        assert_eq!(h.as_slice().len(), 11);
        assert_eq!(h.get(3), 2);
        assert_eq!(h.get(5), 1);
        assert_eq!(h.get(2), 0);
        assert_eq!(h.get(0), 0);
        assert_eq!(h.n_events(), 3);
    }

    #[test]
    fn zero_min_length_corrects_bucket_zero() {
        // Encoding of [1,1,1,0,0,1,1,0]: runs 3 and 2.
        let enc = [3, 0, 0, 0, 0, 2, 0, 0];
        let h = count_occurrences(enc, 0, 5);
        // Naive zeros = 6, minus 1*(3-1) + 1*(2-1) = 3 → 3 true non-event days.
        assert_eq!(h.get(0), 3);
        assert_eq!(h.get(2), 1);
        assert_eq!(h.get(3), 1);
    }

    #[test]
    fn one_min_length_skips_correction() {
        let enc = [3, 0, 0, 0];
        let h = count_occurrences(enc, 1, 5);
        assert_eq!(h.get(0), 0);
        assert_eq!(h.get(3), 1);
    }

    #[test]
    fn accumulate_adds_buckets() {
        let mut a = count_occurrences([3, 4], 3, 5);
        let b = count_occurrences([4, 5], 3, 5);
        a.accumulate(&b);
        assert_eq!(a.as_slice(), &[0, 0, 0, 1, 2, 1]);
    }

    #[test]
    fn zero_max_length() {
        let h = count_occurrences([0, 0, 4], 0, 0);
        assert_eq!(h.as_slice(), &[2]);
    }
}
