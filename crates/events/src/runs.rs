//! Run-length encoding of exceedance masks.

/// Encodes maximal runs of `true` as their length at the run's first index.
///
/// Every other position (continuation days and non-exceedance days) is 0.
/// Single pass: each index is visited once.
///
/// ```
/// use sre_events::encode_runs;
///
/// let mask = [true, true, true, false, true, false, true, true];
/// assert_eq!(encode_runs(&mask), vec![3, 0, 0, 0, 1, 0, 2, 0]);
/// ```
pub fn encode_runs(mask: &[bool]) -> Vec<usize> {
    let mut out = vec![0usize; mask.len()];
    let mut i = 0;
    while i < mask.len() {
        if !mask[i] {
            i += 1;
            continue;
        }
        let start = i;
        while i < mask.len() && mask[i] {
            i += 1;
        }
        out[start] = i - start;
    }
    out
}

/// Zeroes every run shorter than `floor`.
pub fn apply_floor(encoding: &mut [usize], floor: usize) {
    for v in encoding.iter_mut().filter(|v| **v < floor) {
        *v = 0;
    }
}

/// Replaces each maximal group of non-zero values with the group mean at its
/// first position and zeros elsewhere. Zeros are preserved.
///
/// ```
/// use sre_events::run_means;
///
/// let out = run_means(&[0.0, 2.0, 4.0, 0.0, 3.0]);
/// assert_eq!(out, vec![0.0, 3.0, 0.0, 0.0, 3.0]);
/// ```
pub fn run_means(values: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    let mut i = 0;
    while i < values.len() {
        if values[i] == 0.0 {
            i += 1;
            continue;
        }
        let start = i;
        let mut sum = 0.0;
        while i < values.len() && values[i] != 0.0 {
            sum += values[i];
            i += 1;
        }
        out[start] = sum / (i - start) as f64;
    }
    out
}
