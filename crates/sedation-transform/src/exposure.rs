//! Whole-recording checks on a single signal.

use ndarray::ArrayView1;

/// True when any sample is strictly above `threshold`. NaN never is.
pub fn any_above(values: ArrayView1<'_, f64>, threshold: f64) -> bool {
    values.iter().any(|v| *v > threshold)
}

/// Largest non-NaN sample, or `None` when there is none.
pub fn peak(values: ArrayView1<'_, f64>) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f64::max)
}
