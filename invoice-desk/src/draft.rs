//! Invoice drafts
//!
//! A draft is a JSON description of what an operator would enter step by
//! step: the customer, the documents, who takes which document, and the
//! financial edits. [`run_draft`] replays it through the workflow up to the
//! Preview step.

use crate::finance::FinancialChange;
use crate::workflow::{InvoiceWorkflow, WorkflowError, WorkflowResult};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, FieldError, ValidationErrors};
use shared::invoice::{LineItemId, PricingOptions, WorkflowStep};
use shared::models::Customer;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub customer: Customer,
    #[serde(default)]
    pub documents: Vec<DraftDocument>,
    /// Ignored when the invoice has a single person
    #[serde(default)]
    pub assignments: Vec<DraftAssignment>,
    #[serde(default)]
    pub financial_changes: Vec<FinancialChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftDocument {
    pub service_id: String,
    #[serde(flatten)]
    pub options: PricingOptions,
}

/// Every copy of `documents[document]` goes to `person`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAssignment {
    pub document: usize,
    pub person: String,
}

impl InvoiceDraft {
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::validation(format!("Failed to read draft {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> AppResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| AppError::validation(format!("Invalid draft: {e}")))
    }
}

/// Drive a fresh workflow through every step up to Preview
pub fn run_draft(workflow: &mut InvoiceWorkflow, draft: &InvoiceDraft) -> WorkflowResult<()> {
    workflow.set_customer(draft.customer.clone())?;
    workflow.next()?;

    let mut item_ids: Vec<LineItemId> = Vec::with_capacity(draft.documents.len());
    for document in &draft.documents {
        item_ids.push(workflow.add_line_item(&document.service_id, &document.options)?);
    }

    if workflow.next()? == WorkflowStep::Assignment {
        for (i, assignment) in draft.assignments.iter().enumerate() {
            let Some(&item_id) = item_ids.get(assignment.document) else {
                return Err(WorkflowError::Validation(ValidationErrors::from(
                    FieldError::new(
                        format!("assignments[{i}].document"),
                        format!("refers to missing document {}", assignment.document),
                    ),
                )));
            };
            workflow.assign_item(item_id, &assignment.person)?;
        }
        workflow.next()?;
    }

    for change in &draft.financial_changes {
        workflow.apply_financial_change(change.clone())?;
    }
    workflow.next()?;
    Ok(())
}
