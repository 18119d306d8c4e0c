use thiserror::Error;

use crate::cell::ColumnType;

/// Error type for all engine operations.
///
/// Configuration errors (bad column name, mismatched index, incomparable
/// types) are raised before any partial work is done. `Transform` is the
/// only error produced mid-scan and it aborts the whole operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("label not found in index: {0}")]
    LabelNotFound(String),

    #[error("index out of bounds: position {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("index mismatch: {0}")]
    IndexMismatch(String),

    #[error("column type mismatch: column {name}, expected {expected}, found {found}")]
    ColumnTypeMismatch {
        name: String,
        expected: ColumnType,
        found: ColumnType,
    },

    #[error("cannot compare {left} with {right}")]
    IncomparableTypes { left: String, right: String },

    #[error("transform failed at row {row}: {message}")]
    Transform { row: usize, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
