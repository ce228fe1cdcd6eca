//! Pricing
//!
//! Per-item price calculation against a catalog loaded once per workflow run.
//! All monetary values are whole currency units (`i64`); no floating point.

mod catalog;
mod fee_schedule;
mod item_calculator;

pub use catalog::*;
pub use fee_schedule::*;
pub use item_calculator::*;
