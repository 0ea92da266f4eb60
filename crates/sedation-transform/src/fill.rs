use ndarray::ArrayViewMut1;

/// Carries the last valid value forward over NaN runs.
///
/// At most `limit` values of each run are filled; the remainder of a longer
/// run stays NaN. NaNs before the first valid value are left alone.
pub fn forward_fill(mut values: ArrayViewMut1<'_, f64>, limit: usize) {
    let mut last = None;
    let mut run = 0usize;
    for value in values.iter_mut() {
        if value.is_nan() {
            if let Some(fill) = last {
                if run < limit {
                    *value = fill;
                }
                run += 1;
            }
        } else {
            last = Some(*value);
            run = 0;
        }
    }
}
