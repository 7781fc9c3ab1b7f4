//! NaN-aware statistical helpers for daily climate series.
//!
//! Missing data in climate-model output is represented as `NaN`; every
//! `nan_*` function ignores those entries instead of propagating them.

/// Linear-interpolation quantile between order statistics (R type 7, NumPy
/// `"linear"`).
///
/// **Expects pre-sorted, NaN-free input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Percentile (`0.0..=100.0`) of the non-NaN values in `scratch`.
///
/// `scratch` is reordered and NaN entries are dropped from it. Returns `NaN`
/// when every value is missing or `scratch` is empty.
pub fn nan_percentile_in_place(scratch: &mut Vec<f64>, percentile: f64) -> f64 {
    scratch.retain(|v| !v.is_nan());
    if scratch.is_empty() {
        return f64::NAN;
    }
    scratch.sort_by(f64::total_cmp);
    quantile_type7(scratch, percentile / 100.0)
}

/// Mean of the non-NaN values. Returns `NaN` if there are none.
pub fn nan_mean(data: &[f64]) -> f64 {
    let (sum, n) = data
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}
