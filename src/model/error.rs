//! Error types for model training.

use std::fmt;

/// Error type for model training operations.
#[derive(Debug)]
pub enum ModelError {
    /// Training data had no rows.
    EmptyData,
    /// Target length did not match the number of training rows.
    DimensionMismatch { expected: usize, got: usize },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyData => write!(f, "Cannot fit model on empty data"),
            ModelError::DimensionMismatch { expected, got } => {
                write!(f, "Target length mismatch: expected {}, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for ModelError {}
