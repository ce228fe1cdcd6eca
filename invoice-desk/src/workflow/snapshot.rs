use crate::assignment::AssignmentLedger;
use serde::Serialize;
use shared::invoice::{InvoiceDetails, InvoiceLineItem};
use shared::models::{Companion, Customer};

/// Finished invoice handed to the preview/persistence collaborator
///
/// `customer.companions` is emptied; companions travel in their own field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSnapshot {
    pub customer: Customer,
    pub companions: Vec<Companion>,
    pub line_items: Vec<InvoiceLineItem>,
    pub assignment_ledger: AssignmentLedger,
    pub invoice_details: InvoiceDetails,
}

impl InvoiceSnapshot {
    pub fn new(
        mut customer: Customer,
        line_items: Vec<InvoiceLineItem>,
        assignment_ledger: AssignmentLedger,
        invoice_details: InvoiceDetails,
    ) -> Self {
        let companions = std::mem::take(&mut customer.companions);
        Self {
            customer,
            companions,
            line_items,
            assignment_ledger,
            invoice_details,
        }
    }

    /// Payable total after discount, emergency surcharge and advance
    pub fn final_amount(&self) -> i64 {
        self.invoice_details.final_amount
    }
}
