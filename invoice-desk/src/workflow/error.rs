use crate::assignment::AssignmentError;
use shared::error::{AppError, ErrorCode, ValidationErrors};
use shared::invoice::{LineItemId, WorkflowStep};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Assignment(AssignmentError),

    #[error("Partition violated: {0}")]
    PartitionViolation(String),

    #[error("{action} is not allowed at step {step}")]
    StepNotAllowed {
        step: WorkflowStep,
        action: &'static str,
    },

    #[error("Customer information has not been entered")]
    CustomerMissing,

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Line item not found: {0}")]
    LineItemNotFound(LineItemId),

    #[error("At least one document is required")]
    NoLineItems,

    #[error("{0} copies are not assigned to a person")]
    UnassignedCopies(usize),

    #[error(transparent)]
    External(AppError),
}

impl From<AssignmentError> for WorkflowError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::PartitionViolation(msg) => WorkflowError::PartitionViolation(msg),
            other => WorkflowError::Assignment(other),
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Validation(errors) => AppError::from(errors),
            WorkflowError::Assignment(e) => {
                let code = match &e {
                    AssignmentError::CopyNotFound(_) => ErrorCode::CopyNotFound,
                    AssignmentError::ItemNotFound(_) => ErrorCode::LineItemNotFound,
                    AssignmentError::PersonNotFound(_) => ErrorCode::PersonNotFound,
                    AssignmentError::DuplicatePerson(_) => ErrorCode::DuplicatePersonName,
                    AssignmentError::ReservedName(_) => ErrorCode::ValidationFailed,
                    AssignmentError::PartitionViolation(_) => ErrorCode::PartitionViolation,
                };
                AppError::with_message(code, e.to_string())
            }
            WorkflowError::PartitionViolation(msg) => {
                AppError::invariant(format!("Partition violated: {msg}"))
            }
            WorkflowError::StepNotAllowed { step, action } => AppError::with_message(
                ErrorCode::StepNotAllowed,
                format!("{action} is not allowed at step {step}"),
            )
            .with_detail("step", step.as_str()),
            WorkflowError::CustomerMissing => AppError::new(ErrorCode::CustomerMissing),
            WorkflowError::ServiceNotFound(id) => {
                AppError::with_message(
                    ErrorCode::ServiceNotFound,
                    format!("Service not found: {id}"),
                )
                .with_detail("service_id", id)
            }
            WorkflowError::LineItemNotFound(id) => AppError::with_message(
                ErrorCode::LineItemNotFound,
                format!("Line item not found: {id}"),
            ),
            WorkflowError::NoLineItems => AppError::new(ErrorCode::NoLineItems),
            WorkflowError::UnassignedCopies(count) => AppError::with_message(
                ErrorCode::UnassignedCopies,
                format!("{count} copies are not assigned to a person"),
            )
            .with_detail("count", count),
            WorkflowError::External(e) => e,
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
