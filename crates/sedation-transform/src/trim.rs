use ndarray::{Array2, ArrayView1, s};

/// Inclusive `(first, last)` row indices of positive samples.
pub fn valid_span(values: ArrayView1<'_, f64>) -> Option<(usize, usize)> {
    let first = values.iter().position(|v| *v > 0.0)?;
    let last = values.iter().rposition(|v| *v > 0.0)?;
    Some((first, last))
}

/// Copies rows `first..=last` into a new matrix.
pub fn trim_rows(matrix: &Array2<f64>, first: usize, last: usize) -> Array2<f64> {
    matrix.slice(s![first..=last, ..]).to_owned()
}
