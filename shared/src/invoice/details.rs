//! Invoice financial details
//!
//! Three percent/amount pairs (discount, emergency surcharge, advance payment)
//! are kept in sync by the financial aggregator; this module only holds the
//! data and the arithmetic identities between its fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of a percent/amount pair the operator last edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentAnchor {
    #[default]
    Percent,
    Amount,
}

/// A percent/amount pair kept in sync against a base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkedAdjustment {
    /// Percentage of the base (2 decimal places)
    #[serde(with = "rust_decimal::serde::float")]
    pub percent: Decimal,
    /// Whole currency units
    pub amount: i64,
    /// Side that drives the other on recomputation
    pub anchor: AdjustmentAnchor,
}

impl LinkedAdjustment {
    pub fn from_percent(percent: Decimal) -> Self {
        Self {
            percent,
            amount: 0,
            anchor: AdjustmentAnchor::Percent,
        }
    }

    pub fn from_amount(amount: i64) -> Self {
        Self {
            percent: Decimal::ZERO,
            amount,
            anchor: AdjustmentAnchor::Amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0 && self.percent.is_zero()
    }
}

/// Service-cost subtotals summed across all line items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostSubtotals {
    /// Translation prices plus extra-copy prices
    pub translation: i64,
    /// Judiciary and foreign affairs seals
    pub confirmation: i64,
    /// Official registration
    pub registration: i64,
    pub certified_copy: i64,
}

impl CostSubtotals {
    /// Base for discount and emergency surcharge
    pub fn base(&self) -> i64 {
        self.translation + self.confirmation + self.registration + self.certified_copy
    }
}

/// Financial details of the invoice
///
/// Recomputed in full on every input change; derived totals are never stale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceDetails {
    /// Assigned by the external sequence on first entry into the details step
    pub invoice_number: Option<String>,
    /// Sum of line-item quantities (not the number of items)
    pub document_count: u32,
    pub issue_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub remarks: Option<String>,

    pub subtotals: CostSubtotals,

    pub discount: LinkedAdjustment,
    pub emergency: LinkedAdjustment,
    pub advance: LinkedAdjustment,

    // === Derived ===
    /// base + emergency
    pub total_before_discount: i64,
    /// total_before_discount - discount
    pub total_after_discount: i64,
    /// total_after_discount - advance
    pub final_amount: i64,
}

impl InvoiceDetails {
    /// Service-cost base for discount and emergency surcharge
    pub fn base(&self) -> i64 {
        self.subtotals.base()
    }

    /// Base for the advance payment: base + emergency - discount
    pub fn payable(&self) -> i64 {
        self.base() + self.emergency.amount - self.discount.amount
    }
}
