//! Customer and companion validation

use crate::assignment::UNASSIGNED_KEY;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, optional_email, optional_text,
    phone_number, require_text,
};
use shared::error::ValidationErrors;
use shared::models::Customer;
use std::collections::HashSet;

/// Check every customer field and every companion
///
/// Person names must be distinct after trimming since they key the
/// assignment buckets, and none may take the reserved unassigned key.
pub fn validate_customer(customer: &Customer) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    require_text(&mut errors, &customer.identifier, "customer.identifier", MAX_SHORT_TEXT_LEN);
    require_text(&mut errors, &customer.name, "customer.name", MAX_NAME_LEN);
    phone_number(&mut errors, &customer.phone, "customer.phone");
    optional_email(&mut errors, &customer.email, "customer.email");
    optional_text(&mut errors, &customer.address, "customer.address", MAX_ADDRESS_LEN);

    let mut names: HashSet<String> = HashSet::new();
    let customer_name = customer.name.trim();
    if is_reserved(customer_name) {
        errors.add("customer.name", "is reserved");
    } else if !customer_name.is_empty() {
        names.insert(customer_name.to_lowercase());
    }

    for (i, companion) in customer.companions.iter().enumerate() {
        let field = format!("companions[{i}].name");
        require_text(&mut errors, &companion.name, &field, MAX_NAME_LEN);

        let name = companion.name.trim();
        if is_reserved(name) {
            errors.add(field, "is reserved");
        } else if !name.is_empty() && !names.insert(name.to_lowercase()) {
            errors.add(field, "duplicates another person on this invoice");
        }
        optional_text(
            &mut errors,
            &companion.identifier,
            &format!("companions[{i}].identifier"),
            MAX_SHORT_TEXT_LEN,
        );
    }

    errors
}

fn is_reserved(name: &str) -> bool {
    name.eq_ignore_ascii_case(UNASSIGNED_KEY)
}

/// Trim the text fields the operator typed
pub fn normalize_customer(mut customer: Customer) -> Customer {
    customer.identifier = customer.identifier.trim().to_string();
    customer.name = customer.name.trim().to_string();
    customer.phone = customer.phone.trim().to_string();
    customer.email = customer
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    customer.address = customer
        .address
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());
    for companion in &mut customer.companions {
        companion.name = companion.name.trim().to_string();
        companion.identifier = companion
            .identifier
            .take()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
    }
    customer
}
