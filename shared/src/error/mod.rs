//! Unified error system for the invoice desk
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`FieldError`] / [`ValidationErrors`]: Field-level validation reports
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Customer errors
//! - 2xxx: Document / line item errors
//! - 3xxx: Assignment errors
//! - 5xxx: Workflow errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, FieldError, ValidationErrors};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::NotFound);
//!
//! // Create an error with custom message
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid phone number");
//!
//! // Field-level validation errors
//! let errors = ValidationErrors::from(vec![FieldError::required("customer.name")]);
//! let err = AppError::from(errors);
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod fields;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use fields::{FieldError, ValidationErrors};
pub use types::{AppError, AppResult};
