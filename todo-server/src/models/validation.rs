//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required todo data is absent, blank or not a string
    MissingData,

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Path segment is not a valid integer id
    InvalidId { value: String },

    /// Request body is not valid JSON
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingData => write!(f, "Bad request! Required todo data is missing."),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidId { .. } => {
                write!(f, "Validation failed (numeric string is expected)")
            }
            Self::MalformedBody { reason } => write!(f, "Bad request! {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
