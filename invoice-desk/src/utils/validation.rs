//! Input validation helpers
//!
//! Centralized limits and field checks. Every helper records into a
//! [`ValidationErrors`] collector so one pass reports every bad field.

use shared::error::ValidationErrors;

// ── Text length limits ──────────────────────────────────────────────

/// Person names, service names
pub const MAX_NAME_LEN: usize = 200;

/// Remarks and notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: national id, phone, language names
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Count limits ────────────────────────────────────────────────────

/// Maximum copies (main or extra) per line item
pub const MAX_QUANTITY: u32 = 999;

/// Maximum pages per copy
pub const MAX_PAGE_COUNT: u32 = 9_999;

/// Maximum quantity for a single dynamic fee
pub const MAX_DYNAMIC_FEE_QUANTITY: u32 = 9_999;

/// Maximum unit price accepted from the catalog (whole currency units)
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000;

// ── Field checks ────────────────────────────────────────────────────

/// Required string: non-blank and within the length limit.
pub fn require_text(errors: &mut ValidationErrors, value: &str, field: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.add(field, "is required");
    } else if value.chars().count() > max_len {
        errors.add(
            field,
            format!("is too long ({} chars, max {max_len})", value.chars().count()),
        );
    }
}

/// Optional string: within the length limit when present.
pub fn optional_text(
    errors: &mut ValidationErrors,
    value: &Option<String>,
    field: &str,
    max_len: usize,
) {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        errors.add(
            field,
            format!("is too long ({} chars, max {max_len})", v.chars().count()),
        );
    }
}

/// Integer count within `min..=max`.
pub fn count_in_range(errors: &mut ValidationErrors, value: u32, field: &str, min: u32, max: u32) {
    if value < min {
        errors.add(field, format!("must be at least {min}"));
    } else if value > max {
        errors.add(field, format!("must not exceed {max}"));
    }
}

/// Phone number: optional leading `+`, then 7 to 15 digits.
pub fn phone_number(errors: &mut ValidationErrors, value: &str, field: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, "is required");
        return;
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_digit()) || !(7..=15).contains(&digits.len()) {
        errors.add(field, "must contain 7 to 15 digits");
    }
}

/// Email address: a single `@` with text on both sides and a dot in the domain.
pub fn optional_email(errors: &mut ValidationErrors, value: &Option<String>, field: &str) {
    let Some(email) = value.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return;
    };
    if email.len() > MAX_EMAIL_LEN {
        errors.add(field, format!("is too long (max {MAX_EMAIL_LEN})"));
        return;
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid {
        errors.add(field, "is not a valid email address");
    }
}
