//! Field-level validation errors
//!
//! Validation failures are reported per field so the UI can show inline
//! messages. They block forward navigation only and are always recoverable.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single invalid input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the field (e.g. `customer.phone`, `companions[1].name`)
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The field is required but missing or blank
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// A non-empty list of field errors collected in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Record a field error
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether any error refers to `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was collected, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "Validation failed: {}", parts.join("; "))
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.push(FieldError::required("customer.name"));
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.has_field("customer.name"));
    }

    #[test]
    fn test_display() {
        let errors = ValidationErrors::from(vec![
            FieldError::required("customer.name"),
            FieldError::new("customer.phone", "must contain 7 to 15 digits"),
        ]);
        assert_eq!(
            errors.to_string(),
            "Validation failed: customer.name is required; customer.phone must contain 7 to 15 digits"
        );
    }

    #[test]
    fn test_serializes_as_list() {
        let errors = ValidationErrors::from(FieldError::required("options.page_count"));
        let json = serde_json::to_value(&errors).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["field"], "options.page_count");
    }
}
