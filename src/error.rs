//! Error taxonomy for the prediction pipeline.
//!
//! Every failure a request can hit maps onto exactly one of these variants,
//! which the HTTP layer translates to a status code: client-input faults are
//! 400, missing artifacts are 404, everything else is 500.

use std::fmt;

/// Error type for the validate → transform → predict pipeline.
#[derive(Debug)]
pub enum PredictError {
    /// A required request field was absent.
    MissingField(String),
    /// A request field was present but failed a type or range check.
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },
    /// A model or preprocessor artifact is not in the store.
    ArtifactNotFound(String),
    /// Catch-all for failures that are not the caller's fault.
    Unexpected(String),
}

impl PredictError {
    /// Convenience constructor for range/enum violations.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        PredictError::InvalidField {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::MissingField(field) => {
                write!(f, "Missing required field: '{}'", field)
            }
            PredictError::InvalidField { message, .. } => write!(f, "{}", message),
            PredictError::ArtifactNotFound(msg) => write!(f, "{}", msg),
            PredictError::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for PredictError {}
