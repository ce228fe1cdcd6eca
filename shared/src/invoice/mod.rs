//! Invoice composition types
//!
//! - **line_item**: priced line items and the operator's pricing options
//! - **copy**: unit copies produced by unpacking multi-copy items
//! - **details**: financial details with linked percent/amount pairs
//! - **step**: the ordered workflow steps

pub mod copy;
pub mod details;
pub mod line_item;
pub mod step;

pub use copy::{CopyId, UnpackedCopy};
pub use details::{AdjustmentAnchor, CostSubtotals, InvoiceDetails, LinkedAdjustment};
pub use line_item::{DynamicFeeSelection, InvoiceLineItem, LineItemId, PricingOptions};
pub use step::WorkflowStep;
