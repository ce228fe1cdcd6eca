//! Utilities - logging and input validation helpers
//!
//! Error types are re-exported from `shared::error`.

pub mod logger;
pub mod validation;

pub use shared::error::{
    AppError, AppResult, ErrorCategory, ErrorCode, FieldError, ValidationErrors,
};
