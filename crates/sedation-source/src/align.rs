use ndarray::Array2;

/// Time-aligned samples, one row per tick and one column per track.
pub type SignalMatrix = Array2<f64>;

/// Stacks per-track sample vectors into one matrix.
///
/// The matrix is as tall as the longest track; shorter and missing tracks
/// are padded with NaN.
pub fn align_tracks(tracks: &[Option<Vec<f64>>]) -> SignalMatrix {
    let rows = tracks
        .iter()
        .flatten()
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    let mut matrix = Array2::from_elem((rows, tracks.len()), f64::NAN);
    for (col, track) in tracks.iter().enumerate() {
        let Some(values) = track else {
            continue;
        };
        for (row, value) in values.iter().enumerate() {
            matrix[[row, col]] = *value;
        }
    }
    matrix
}
