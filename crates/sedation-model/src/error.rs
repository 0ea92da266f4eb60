use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("segment has {actual} samples, expected {expected}")]
    SegmentLength { expected: usize, actual: usize },
    #[error("dataset columns are misaligned: {eeg} eeg samples, {mac} mac, {bis} bis, {cases} case ids")]
    MisalignedColumns {
        eeg: usize,
        mac: usize,
        bis: usize,
        cases: usize,
    },
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
