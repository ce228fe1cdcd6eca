//! Step order
//!
//! `CustomerInfo → DocumentSelection → [Assignment] → InvoiceDetails → Preview`
//!
//! Assignment is skipped going forward when the invoice has at most one
//! person, and skipped going back when it was not visited on the way in.

use shared::invoice::WorkflowStep;

/// Step after `current`, or `None` at the terminal step
pub fn next_step(current: WorkflowStep, people_count: usize) -> Option<WorkflowStep> {
    match current {
        WorkflowStep::CustomerInfo => Some(WorkflowStep::DocumentSelection),
        WorkflowStep::DocumentSelection if people_count <= 1 => Some(WorkflowStep::InvoiceDetails),
        WorkflowStep::DocumentSelection => Some(WorkflowStep::Assignment),
        WorkflowStep::Assignment => Some(WorkflowStep::InvoiceDetails),
        WorkflowStep::InvoiceDetails => Some(WorkflowStep::Preview),
        WorkflowStep::Preview => None,
    }
}

/// Step before `current`, or `None` at the first step
pub fn prev_step(current: WorkflowStep, assignment_visited: bool) -> Option<WorkflowStep> {
    match current {
        WorkflowStep::CustomerInfo => None,
        WorkflowStep::DocumentSelection => Some(WorkflowStep::CustomerInfo),
        WorkflowStep::Assignment => Some(WorkflowStep::DocumentSelection),
        WorkflowStep::InvoiceDetails if assignment_visited => Some(WorkflowStep::Assignment),
        WorkflowStep::InvoiceDetails => Some(WorkflowStep::DocumentSelection),
        WorkflowStep::Preview => Some(WorkflowStep::InvoiceDetails),
    }
}
