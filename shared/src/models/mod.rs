//! Data models
//!
//! Records supplied by the surrounding application: customers (with their
//! companions), the service catalog and the fixed fee table. The invoice
//! workflow only reads catalog records; customers are captured and may be
//! saved through the customer directory.

pub mod customer;
pub mod fee;
pub mod service;

// Re-exports
pub use customer::*;
pub use fee::*;
pub use service::*;
