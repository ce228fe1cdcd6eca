//! Invoice composition workflow
//!
//! Five ordered steps over one shared state:
//!
//! ```text
//! CustomerInfo → DocumentSelection → [Assignment] → InvoiceDetails → Preview
//! ```
//!
//! - [`navigation`]: pure step-order functions, including the skip rule
//! - [`InvoiceWorkflow`]: owns the state and collaborators, validates each
//!   step on the way out, notifies observers after every mutation
//! - [`InvoiceSnapshot`]: the finished invoice handed to a sink

mod coordinator;
mod customer;
mod error;
pub mod navigation;
mod observer;
mod snapshot;
mod state;

pub use coordinator::{InvoiceSnapshotReceipt, InvoiceWorkflow};
pub use customer::{normalize_customer, validate_customer};
pub use error::{WorkflowError, WorkflowResult};
pub use navigation::{next_step, prev_step};
pub use observer::{StateObserver, SubscriptionId};
pub use snapshot::InvoiceSnapshot;
pub use state::WorkflowState;

#[cfg(test)]
mod tests;
