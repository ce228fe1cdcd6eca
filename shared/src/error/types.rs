//! Application error type

use super::codes::ErrorCode;
use super::fields::ValidationErrors;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Detail key under which field-level errors are stored
pub(crate) const FIELDS_DETAIL_KEY: &str = "fields";

/// Application error with structured error code and details
///
/// This is the primary error type of the invoice desk, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field-level errors, context, etc.)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Field-level errors attached to this error, if any
    pub fn field_errors(&self) -> Option<ValidationErrors> {
        let value = self.details.as_ref()?.get(FIELDS_DETAIL_KEY)?;
        serde_json::from_value(value.clone()).ok()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create an external collaborator error
    pub fn external(service: impl Into<String>, msg: impl Into<String>) -> Self {
        let s = service.into();
        Self::with_message(
            ErrorCode::ExternalServiceError,
            format!("{} failed: {}", s, msg.into()),
        )
        .with_detail("service", s)
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::CatalogUnavailable, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }

    /// Create an invariant breach error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PartitionViolation, msg)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors.to_string();
        let fields = serde_json::to_value(&errors).unwrap_or(Value::Null);
        Self::with_message(ErrorCode::ValidationFailed, message)
            .with_detail(FIELDS_DETAIL_KEY, fields)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
