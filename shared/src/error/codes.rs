//! Unified error codes for the invoice desk
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Customer errors
//! - 2xxx: Document / line item errors
//! - 3xxx: Assignment errors
//! - 5xxx: Workflow errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and for the UI layer, which owns localization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,

    // ==================== 1xxx: Customer ====================
    /// Customer has not been captured yet
    CustomerMissing = 1001,
    /// Two people on the invoice share a name
    DuplicatePersonName = 1003,

    // ==================== 2xxx: Document ====================
    /// Service is not in the catalog
    ServiceNotFound = 2001,
    /// Line item not found
    LineItemNotFound = 2002,
    /// Invoice has no line items
    NoLineItems = 2004,

    // ==================== 3xxx: Assignment ====================
    /// Copy not found in the ledger
    CopyNotFound = 3001,
    /// Person is not part of this invoice
    PersonNotFound = 3002,
    /// Copies are still unassigned
    UnassignedCopies = 3003,

    // ==================== 5xxx: Workflow ====================
    /// Step transition not allowed from the current step
    StepNotAllowed = 5001,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Fee schedule or catalog could not be loaded
    CatalogUnavailable = 9002,
    /// External collaborator failed
    ExternalServiceError = 9003,
    /// Configuration error
    ConfigError = 9004,
    /// Assignment partition invariant was violated
    PartitionViolation = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",

            // Customer
            ErrorCode::CustomerMissing => "Customer information has not been entered",
            ErrorCode::DuplicatePersonName => "Each person on the invoice needs a distinct name",

            // Document
            ErrorCode::ServiceNotFound => "Service not found in catalog",
            ErrorCode::LineItemNotFound => "Line item not found",
            ErrorCode::NoLineItems => "At least one document is required",

            // Assignment
            ErrorCode::CopyNotFound => "Copy not found",
            ErrorCode::PersonNotFound => "Person is not part of this invoice",
            ErrorCode::UnassignedCopies => "Some copies are not assigned to a person",

            // Workflow
            ErrorCode::StepNotAllowed => "Step transition is not allowed",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::CatalogUnavailable => "Service catalog is unavailable",
            ErrorCode::ExternalServiceError => "External service failed",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::PartitionViolation => "Assignment ledger is inconsistent",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),

            // Customer
            1001 => Ok(ErrorCode::CustomerMissing),
            1003 => Ok(ErrorCode::DuplicatePersonName),

            // Document
            2001 => Ok(ErrorCode::ServiceNotFound),
            2002 => Ok(ErrorCode::LineItemNotFound),
            2004 => Ok(ErrorCode::NoLineItems),

            // Assignment
            3001 => Ok(ErrorCode::CopyNotFound),
            3002 => Ok(ErrorCode::PersonNotFound),
            3003 => Ok(ErrorCode::UnassignedCopies),

            // Workflow
            5001 => Ok(ErrorCode::StepNotAllowed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::CatalogUnavailable),
            9003 => Ok(ErrorCode::ExternalServiceError),
            9004 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::PartitionViolation),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
