//! Encoding Error Types

use thiserror::Error;

/// Declared numeric type of a scalar field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Float,
}

impl std::fmt::Display for NumericKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericKind::Integer => f.write_str("integer"),
            NumericKind::Float => f.write_str("number"),
        }
    }
}

/// Errors while turning form input into a feature vector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// A required form field was not submitted
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Value not convertible to the field's declared type
    #[error("{field} must be a valid {kind}, got {value:?}")]
    Parse {
        field: &'static str,
        kind: NumericKind,
        value: String,
    },

    /// Value parsed but outside the domain of its transform
    #[error("{field} must be greater than zero, got {value}")]
    Domain { field: &'static str, value: i64 },
}

impl EncodeError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            EncodeError::MissingField(field) => field,
            EncodeError::Parse { field, .. } => field,
            EncodeError::Domain { field, .. } => field,
        }
    }
}
