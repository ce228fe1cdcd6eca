//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Customer errors (1xxx)
    Customer,
    /// Document / line item errors (2xxx)
    Document,
    /// Assignment errors (3xxx)
    Assignment,
    /// Workflow errors (5xxx)
    Workflow,
    /// System errors (9xxx and anything unmapped)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Customer,
            2000..3000 => Self::Document,
            3000..4000 => Self::Assignment,
            5000..6000 => Self::Workflow,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Customer => "customer",
            Self::Document => "document",
            Self::Assignment => "assignment",
            Self::Workflow => "workflow",
            Self::System => "system",
        }
    }

    /// Whether the operator can fix this class of error by correcting input
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::System)
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Customer);
        assert_eq!(ErrorCategory::from_code(2004), ErrorCategory::Document);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Assignment);
        assert_eq!(ErrorCategory::from_code(4003), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Workflow);
        assert_eq!(ErrorCategory::from_code(7000), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9101), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::CustomerMissing.category(), ErrorCategory::Customer);
        assert_eq!(ErrorCode::LineItemNotFound.category(), ErrorCategory::Document);
        assert_eq!(ErrorCode::PersonNotFound.category(), ErrorCategory::Assignment);
        assert_eq!(ErrorCode::StepNotAllowed.category(), ErrorCategory::Workflow);
        assert_eq!(ErrorCode::PartitionViolation.category(), ErrorCategory::System);
    }

    #[test]
    fn test_recoverable() {
        assert!(ErrorCategory::Customer.is_recoverable());
        assert!(ErrorCategory::Assignment.is_recoverable());
        assert!(!ErrorCategory::System.is_recoverable());
    }
}
