//! Shared types for the invoice desk
//!
//! Domain types used across crates: customers, the service catalog and fee
//! table, invoice line items and copies, financial details, workflow steps,
//! plus the unified error system.

pub mod error;
pub mod invoice;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, FieldError, ValidationErrors};
pub use invoice::{
    AdjustmentAnchor, CopyId, CostSubtotals, DynamicFeeSelection, InvoiceDetails, InvoiceLineItem,
    LineItemId, LinkedAdjustment, PricingOptions, UnpackedCopy, WorkflowStep,
};
pub use models::{Companion, Customer, DynamicFee, FeeKind, FixedFee, Service};
