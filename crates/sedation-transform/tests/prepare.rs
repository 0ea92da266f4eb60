//! Tests for per-case signal preparation.

use ndarray::{Array2, array};

use sedation_model::tracks::{BIS_COLUMN, EEG_COLUMN, SEVO_COLUMN};
use sedation_model::{DatasetOptions, SkipReason};
use sedation_transform::{Prepared, TransformError, age_adjusted_mac, prepare_signals};

/// 4 Hz, 10 s minimum duration, 5 s fill limit.
fn small_options() -> DatasetOptions {
    DatasetOptions::default()
        .with_sample_rate(4)
        .with_window_secs(2)
        .with_min_duration_secs(10)
}

fn build(rows: usize, sevo: impl Fn(usize) -> f64, bis: impl Fn(usize) -> f64) -> Array2<f64> {
    Array2::from_shape_fn((rows, 3), |(row, col)| match col {
        EEG_COLUMN => row as f64,
        SEVO_COLUMN => sevo(row),
        _ => bis(row),
    })
}

fn ready(prepared: Prepared) -> Array2<f64> {
    match prepared {
        Prepared::Ready(matrix) => matrix,
        Prepared::Skipped(reason) => panic!("unexpected skip: {reason}"),
    }
}

#[test]
fn low_sevoflurane_is_insufficient() {
    let matrix = build(80, |_| 0.9, |_| 45.0);
    let prepared = prepare_signals(matrix, 50.0, &small_options()).unwrap();
    assert_eq!(prepared, Prepared::Skipped(SkipReason::InsufficientAgent));
}

#[test]
fn missing_sevoflurane_is_insufficient() {
    let matrix = build(80, |_| f64::NAN, |_| 45.0);
    let prepared = prepare_signals(matrix, 50.0, &small_options()).unwrap();
    assert_eq!(prepared, Prepared::Skipped(SkipReason::InsufficientAgent));
}

#[test]
fn peak_of_exactly_the_minimum_is_enough() {
    let matrix = build(80, |_| 1.0, |_| 45.0);
    let prepared = prepare_signals(matrix, 50.0, &small_options()).unwrap();
    assert!(matches!(prepared, Prepared::Ready(_)));
}

#[test]
fn bis_without_positive_values_is_rejected() {
    let matrix = build(80, |_| 2.0, |row| if row % 2 == 0 { 0.0 } else { f64::NAN });
    let prepared = prepare_signals(matrix, 50.0, &small_options()).unwrap();
    assert_eq!(prepared, Prepared::Skipped(SkipReason::NoValidDepth));
}

#[test]
fn short_valid_span_is_rejected() {
    // 39 valid rows at 4 Hz is just under 10 s.
    let matrix = build(100, |_| 2.0, |row| if (20..59).contains(&row) { 50.0 } else { 0.0 });
    let prepared = prepare_signals(matrix, 50.0, &small_options()).unwrap();
    assert_eq!(prepared, Prepared::Skipped(SkipReason::TooShort));
}

#[test]
fn trims_normalizes_and_fills() {
    let bis = |row: usize| match row {
        0..10 => f64::NAN,
        10..20 => 0.0,
        20..=69 if row % 10 == 5 => f64::NAN,
        20..=69 => 60.0,
        _ => 0.0,
    };
    let matrix = build(90, |_| 1.8, bis);

    let trimmed = ready(prepare_signals(matrix, 40.0, &small_options()).unwrap());

    assert_eq!(trimmed.nrows(), 50);
    assert_eq!(trimmed[[0, EEG_COLUMN]], 20.0);
    assert_eq!(trimmed[[49, EEG_COLUMN]], 69.0);
    assert!((trimmed[[0, SEVO_COLUMN]] - age_adjusted_mac(1.8, 40.0)).abs() < 1e-12);
    assert!((trimmed[[0, SEVO_COLUMN]] - 1.0).abs() < 1e-12);
    assert!(trimmed.column(BIS_COLUMN).iter().all(|v| *v == 60.0));
}

#[test]
fn rejects_matrices_with_the_wrong_shape() {
    let matrix = array![[1.0, 2.0], [3.0, 4.0]];
    let result = prepare_signals(matrix, 50.0, &small_options());
    assert!(matches!(
        result,
        Err(TransformError::ColumnCount {
            expected: 3,
            actual: 2
        })
    ));
}
