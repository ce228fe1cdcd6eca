//! Financial aggregator
//!
//! Sums line-item subtotals, then applies three percent/amount pairs:
//! - discount and emergency surcharge against the service-cost base
//! - advance payment against the payable total (base + emergency - discount)
//!
//! Each pair remembers which side the operator last edited; every change runs
//! a full recomputation that derives the other side from it. Amounts are whole
//! currency units, percentages are `Decimal` with 2 decimal places.

use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, optional_text};
use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::error::ValidationErrors;
use shared::invoice::{
    AdjustmentAnchor, CostSubtotals, InvoiceDetails, InvoiceLineItem, LinkedAdjustment,
};

/// Percentages are rounded to 2 decimal places, half away from zero
const PERCENT_DECIMAL_PLACES: u32 = 2;

/// Upper bound accepted for any percentage input
pub const MAX_PERCENT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Upper bound accepted for any amount input
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

// ==================== Conversion Helpers ====================

/// `floor(base × percent / 100)`
pub fn amount_from_percent(base: i64, percent: Decimal) -> i64 {
    (Decimal::from(base) * percent / Decimal::ONE_HUNDRED)
        .floor()
        .to_i64()
        .unwrap_or_default()
}

/// `amount / base × 100`, 2 decimal places; 0 when the base is 0
pub fn percent_from_amount(base: i64, amount: i64) -> Decimal {
    if base == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(amount) * Decimal::ONE_HUNDRED / Decimal::from(base))
        .round_dp_with_strategy(PERCENT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Derive the non-anchored side of a pair from the anchored one
fn sync_pair(pair: &mut LinkedAdjustment, base: i64) {
    match pair.anchor {
        AdjustmentAnchor::Percent => pair.amount = amount_from_percent(base, pair.percent),
        AdjustmentAnchor::Amount => pair.percent = percent_from_amount(base, pair.amount),
    }
}

/// Cap a pair's amount at `limit`, recomputing the percent; true when clamped
fn clamp_pair(pair: &mut LinkedAdjustment, limit: i64) -> bool {
    let limit = limit.max(0);
    if pair.amount > limit {
        pair.amount = limit;
        pair.percent = percent_from_amount(limit, limit);
        true
    } else {
        false
    }
}

// ==================== Aggregation ====================

/// Sum service-cost subtotals across all line items
///
/// Extra-copy prices count toward the translation subtotal so the four
/// subtotals add up to the sum of item totals.
pub fn subtotals_from_items(items: &[InvoiceLineItem]) -> CostSubtotals {
    items.iter().fold(CostSubtotals::default(), |mut acc, item| {
        acc.translation += item.translation_price + item.extra_copy_price;
        acc.confirmation += item.confirmation_price();
        acc.registration += item.registration_price;
        acc.certified_copy += item.certified_copy_price;
        acc
    })
}

/// Sum of line-item quantities (not the number of items)
pub fn document_count(items: &[InvoiceLineItem]) -> u32 {
    items.iter().map(|i| i.quantity).sum()
}

/// Full recomputation of every derived field
///
/// Order: discount and emergency against the base, then the advance against
/// the payable total, then the derived totals. Clamps are silent.
pub fn recalculate(details: &mut InvoiceDetails) {
    let base = details.base();

    sync_pair(&mut details.discount, base);
    if clamp_pair(&mut details.discount, base) {
        tracing::warn!(base, discount = details.discount.amount, "Discount clamped to base");
    }
    sync_pair(&mut details.emergency, base);

    let payable = details.payable();
    sync_pair(&mut details.advance, payable);
    if clamp_pair(&mut details.advance, payable) {
        tracing::warn!(
            payable,
            advance = details.advance.amount,
            "Advance payment clamped to payable"
        );
    }

    details.total_before_discount = base + details.emergency.amount;
    details.total_after_discount = details.total_before_discount - details.discount.amount;
    details.final_amount = details.total_after_discount - details.advance.amount;

    tracing::debug!(
        base,
        discount = details.discount.amount,
        emergency = details.emergency.amount,
        advance = details.advance.amount,
        final_amount = details.final_amount,
        "Invoice totals recalculated"
    );
}

/// Copy subtotals and document count from the items, then recompute
pub fn refresh_from_items(details: &mut InvoiceDetails, items: &[InvoiceLineItem]) {
    details.subtotals = subtotals_from_items(items);
    details.document_count = document_count(items);
    recalculate(details);
}

// ==================== Field Changes ====================

/// One operator edit on the invoice details form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FinancialChange {
    DiscountPercent(Decimal),
    DiscountAmount(i64),
    EmergencyPercent(Decimal),
    EmergencyAmount(i64),
    AdvancePercent(Decimal),
    AdvanceAmount(i64),
    IssueDate(Option<NaiveDate>),
    DeliveryDate(Option<NaiveDate>),
    LanguagePair {
        source: Option<String>,
        target: Option<String>,
    },
    Remarks(Option<String>),
}

/// Validate and apply one change, then recompute everything
///
/// On error the details are left untouched.
pub fn apply_change(
    details: &mut InvoiceDetails,
    change: FinancialChange,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    match &change {
        FinancialChange::DiscountPercent(p) => {
            check_percent(&mut errors, *p, "details.discount_percent")
        }
        FinancialChange::DiscountAmount(a) => {
            check_amount(&mut errors, *a, "details.discount_amount")
        }
        FinancialChange::EmergencyPercent(p) => {
            check_percent(&mut errors, *p, "details.emergency_percent")
        }
        FinancialChange::EmergencyAmount(a) => {
            check_amount(&mut errors, *a, "details.emergency_amount")
        }
        FinancialChange::AdvancePercent(p) => {
            check_percent(&mut errors, *p, "details.advance_percent")
        }
        FinancialChange::AdvanceAmount(a) => {
            check_amount(&mut errors, *a, "details.advance_amount")
        }
        FinancialChange::IssueDate(date) => {
            if let (Some(issue), Some(delivery)) = (date, details.delivery_date)
                && delivery < *issue
            {
                errors.add("details.issue_date", "must not be after the delivery date");
            }
        }
        FinancialChange::DeliveryDate(date) => {
            if let (Some(issue), Some(delivery)) = (details.issue_date, date)
                && *delivery < issue
            {
                errors.add("details.delivery_date", "must not be before the issue date");
            }
        }
        FinancialChange::LanguagePair { source, target } => {
            optional_text(&mut errors, source, "details.source_language", MAX_SHORT_TEXT_LEN);
            optional_text(&mut errors, target, "details.target_language", MAX_SHORT_TEXT_LEN);
        }
        FinancialChange::Remarks(remarks) => {
            optional_text(&mut errors, remarks, "details.remarks", MAX_NOTE_LEN);
        }
    }
    errors.into_result()?;

    match change {
        FinancialChange::DiscountPercent(p) => details.discount = LinkedAdjustment::from_percent(p),
        FinancialChange::DiscountAmount(a) => details.discount = LinkedAdjustment::from_amount(a),
        FinancialChange::EmergencyPercent(p) => {
            details.emergency = LinkedAdjustment::from_percent(p)
        }
        FinancialChange::EmergencyAmount(a) => details.emergency = LinkedAdjustment::from_amount(a),
        FinancialChange::AdvancePercent(p) => details.advance = LinkedAdjustment::from_percent(p),
        FinancialChange::AdvanceAmount(a) => details.advance = LinkedAdjustment::from_amount(a),
        FinancialChange::IssueDate(date) => details.issue_date = date,
        FinancialChange::DeliveryDate(date) => details.delivery_date = date,
        FinancialChange::LanguagePair { source, target } => {
            details.source_language = source;
            details.target_language = target;
        }
        FinancialChange::Remarks(remarks) => details.remarks = remarks,
    }

    recalculate(details);
    Ok(())
}

/// Validate a whole details object supplied by the caller
pub fn validate_details(details: &InvoiceDetails) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (pair, name) in [
        (&details.discount, "discount"),
        (&details.emergency, "emergency"),
        (&details.advance, "advance"),
    ] {
        check_percent(&mut errors, pair.percent, &format!("details.{name}_percent"));
        check_amount(&mut errors, pair.amount, &format!("details.{name}_amount"));
    }
    if let (Some(issue), Some(delivery)) = (details.issue_date, details.delivery_date)
        && delivery < issue
    {
        errors.add("details.delivery_date", "must not be before the issue date");
    }
    optional_text(
        &mut errors,
        &details.source_language,
        "details.source_language",
        MAX_SHORT_TEXT_LEN,
    );
    optional_text(
        &mut errors,
        &details.target_language,
        "details.target_language",
        MAX_SHORT_TEXT_LEN,
    );
    optional_text(&mut errors, &details.remarks, "details.remarks", MAX_NOTE_LEN);
    errors
}

fn check_percent(errors: &mut ValidationErrors, value: Decimal, field: &str) {
    if value.is_sign_negative() && !value.is_zero() {
        errors.add(field, "must not be negative");
    } else if value > MAX_PERCENT {
        errors.add(field, format!("must not exceed {MAX_PERCENT}"));
    }
}

fn check_amount(errors: &mut ValidationErrors, value: i64, field: &str) {
    if value < 0 {
        errors.add(field, "must not be negative");
    } else if value > MAX_AMOUNT {
        errors.add(field, format!("must not exceed {MAX_AMOUNT}"));
    }
}

#[cfg(test)]
mod tests;
