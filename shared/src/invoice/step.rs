//! Workflow steps

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five ordered stages of invoice composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    CustomerInfo,
    DocumentSelection,
    Assignment,
    InvoiceDetails,
    Preview,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 5] = [
        WorkflowStep::CustomerInfo,
        WorkflowStep::DocumentSelection,
        WorkflowStep::Assignment,
        WorkflowStep::InvoiceDetails,
        WorkflowStep::Preview,
    ];

    /// Zero-based step index
    pub const fn index(self) -> usize {
        match self {
            WorkflowStep::CustomerInfo => 0,
            WorkflowStep::DocumentSelection => 1,
            WorkflowStep::Assignment => 2,
            WorkflowStep::InvoiceDetails => 3,
            WorkflowStep::Preview => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, WorkflowStep::Preview)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            WorkflowStep::CustomerInfo => "customer_info",
            WorkflowStep::DocumentSelection => "document_selection",
            WorkflowStep::Assignment => "assignment",
            WorkflowStep::InvoiceDetails => "invoice_details",
            WorkflowStep::Preview => "preview",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
