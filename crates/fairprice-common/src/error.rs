//! Error types for FairPrice
//!
//! Provides a unified error type plus the field-level validation errors
//! reported back to the pricing form

use serde::Serialize;
use thiserror::Error;

/// Result type alias using FairPriceError
pub type Result<T> = std::result::Result<T, FairPriceError>;

/// Unified error type for FairPrice operations
#[derive(Debug, Error)]
pub enum FairPriceError {
    // Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Arithmetic left the representable decimal range
    #[error("Pricing calculation overflow")]
    Overflow,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A single offending input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the field (e.g. `unitCost`)
    pub field: &'static str,
    /// Message shown next to the field
    pub message: &'static str,
}

impl FieldError {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Caller-side validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no input provided")]
    MissingInput,

    #[error("invalid input: {}", describe(.fields))]
    InvalidInput { fields: Vec<FieldError> },
}

impl ValidationError {
    /// Offending fields, empty for [`ValidationError::MissingInput`]
    pub fn fields(&self) -> &[FieldError] {
        match self {
            ValidationError::MissingInput => &[],
            ValidationError::InvalidInput { fields } => fields,
        }
    }
}

fn describe(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for FairPriceError {
    fn from(err: serde_json::Error) -> Self {
        FairPriceError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FairPriceError::Config("weights must sum to 1".to_string());
        assert_eq!(err.to_string(), "Configuration error: weights must sum to 1");
    }

    #[test]
    fn test_invalid_input_lists_every_field() {
        let err = ValidationError::InvalidInput {
            fields: vec![
                FieldError::new("unitCost", "Please enter a valid unit cost"),
                FieldError::new("competitorMaxPrice", "Please enter a valid maximum price"),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("unitCost: Please enter a valid unit cost"));
        assert!(text.contains("competitorMaxPrice"));
        assert_eq!(err.fields().len(), 2);
    }

    #[test]
    fn test_json_error_becomes_serialization() {
        let err: FairPriceError = serde_json::from_str::<u32>("\"abc\"").unwrap_err().into();
        match err {
            FairPriceError::Serialization(msg) => assert!(msg.contains("invalid type")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_input_has_no_fields() {
        let err = FairPriceError::from(ValidationError::MissingInput);
        assert_eq!(err.to_string(), "Validation error: no input provided");
        assert!(ValidationError::MissingInput.fields().is_empty());
    }
}
