use thiserror::Error;

use sedation_model::ModelError;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("signal matrix has {actual} columns, expected {expected}")]
    ColumnCount { expected: usize, actual: usize },
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
