use crate::assignment::AssignmentLedger;
use serde::Serialize;
use shared::invoice::{InvoiceDetails, InvoiceLineItem, UnpackedCopy, WorkflowStep};
use shared::models::Customer;

/// The single root state of one invoice composition
///
/// Owned by the coordinator; observers and callers only ever see it through
/// a shared reference.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowState {
    pub step: WorkflowStep,
    pub customer: Option<Customer>,
    pub line_items: Vec<InvoiceLineItem>,
    /// Full unpacked set the ledger partitions
    pub copies: Vec<UnpackedCopy>,
    pub ledger: Option<AssignmentLedger>,
    pub details: InvoiceDetails,
    /// Whether the last forward pass entered the Assignment step
    pub assignment_visited: bool,

    /// Bumped on every line item change
    #[serde(skip)]
    pub(crate) items_revision: u64,
    /// `items_revision` the ledger was built from
    #[serde(skip)]
    pub(crate) ledger_revision: Option<u64>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self {
            step: WorkflowStep::CustomerInfo,
            customer: None,
            line_items: Vec::new(),
            copies: Vec::new(),
            ledger: None,
            details: InvoiceDetails::default(),
            assignment_visited: false,
            items_revision: 0,
            ledger_revision: None,
        }
    }

    pub fn step_index(&self) -> usize {
        self.step.index()
    }

    /// Customer followed by companions; empty before a customer is entered
    pub fn people(&self) -> Vec<&str> {
        self.customer.as_ref().map(Customer::people).unwrap_or_default()
    }

    pub fn number_of_people(&self) -> usize {
        self.customer.as_ref().map_or(0, Customer::number_of_people)
    }

    pub fn line_item(&self, id: shared::invoice::LineItemId) -> Option<&InvoiceLineItem> {
        self.line_items.iter().find(|i| i.id == id)
    }

    /// Whether the current ledger still matches the line items and people
    pub(crate) fn ledger_is_current(&self) -> bool {
        self.ledger_revision == Some(self.items_revision)
            && self
                .ledger
                .as_ref()
                .is_some_and(|l| l.has_people(self.people()))
    }

    pub(crate) fn touch_items(&mut self) {
        self.items_revision += 1;
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}
