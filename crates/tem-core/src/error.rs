//! # Validation Errors
//!
//! The error type for malformed or out-of-range domain input. Every
//! rejection names the offending field and carries a message with enough
//! context for the caller to act on — which vessel, which bound, what
//! value was seen.

use thiserror::Error;

/// A domain value was rejected at construction or ingest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed on `{field}`: {message}")]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: &'static str,
    /// Human-readable rejection reason, including the observed value.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field` with the given reason.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field_and_reason() {
        let err = ValidationError::new("pounds", "must be positive, got -4");
        assert_eq!(
            err.to_string(),
            "validation failed on `pounds`: must be positive, got -4"
        );
    }
}
