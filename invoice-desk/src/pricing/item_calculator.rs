//! Line Item Price Calculator
//!
//! Prices one selected service under the operator's options:
//! - translation: (base price + dynamic fees) per main copy
//! - certified copy: per page per main copy
//! - official registration and judiciary seal: per main copy
//! - foreign affairs seal: per page (not per copy)
//! - extra copies: flat fee each
//!
//! Pure function of catalog + inputs. Options are validated first; no price
//! is computed from invalid input.

use super::fee_schedule::FixedFeeSchedule;
use crate::utils::validation::{
    MAX_DYNAMIC_FEE_QUANTITY, MAX_NOTE_LEN, MAX_PAGE_COUNT, MAX_QUANTITY, count_in_range,
    optional_text,
};
use shared::error::ValidationErrors;
use shared::invoice::{DynamicFeeSelection, InvoiceLineItem, LineItemId, PricingOptions};
use shared::models::{FeeKind, Service};

/// Validate pricing options against the selected service
///
/// Collects every problem in one pass. Field names are prefixed `options.`.
pub fn validate_options(service: &Service, options: &PricingOptions) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    count_in_range(&mut errors, options.quantity, "options.quantity", 1, MAX_QUANTITY);
    count_in_range(&mut errors, options.page_count, "options.page_count", 1, MAX_PAGE_COUNT);
    count_in_range(&mut errors, options.extra_copies, "options.extra_copies", 0, MAX_QUANTITY);

    for (name, &quantity) in &options.dynamic_fees {
        let field = format!("options.dynamic_fees.{name}");
        if service.dynamic_fee(name).is_none() {
            errors.add(field, format!("is not offered by service {}", service.id));
        } else {
            count_in_range(&mut errors, quantity, &field, 0, MAX_DYNAMIC_FEE_QUANTITY);
        }
    }

    optional_text(&mut errors, &options.remark, "options.remark", MAX_NOTE_LEN);
    errors
}

/// Price a new line item
pub fn calculate_line_item(
    service: &Service,
    fees: &FixedFeeSchedule,
    options: &PricingOptions,
) -> Result<InvoiceLineItem, ValidationErrors> {
    price_line_item(LineItemId::new(), service, fees, options)
}

/// Re-price an existing line item under new options, keeping its identity
pub fn recalculate_line_item(
    item: &InvoiceLineItem,
    service: &Service,
    fees: &FixedFeeSchedule,
    options: &PricingOptions,
) -> Result<InvoiceLineItem, ValidationErrors> {
    price_line_item(item.id, service, fees, options)
}

fn price_line_item(
    id: LineItemId,
    service: &Service,
    fees: &FixedFeeSchedule,
    options: &PricingOptions,
) -> Result<InvoiceLineItem, ValidationErrors> {
    validate_options(service, options).into_result()?;

    let quantity = i64::from(options.quantity);
    let pages = i64::from(options.page_count);
    let extra = i64::from(options.extra_copies);

    // Catalog order, zero quantities dropped
    let dynamic_fees: Vec<DynamicFeeSelection> = service
        .dynamic_fees
        .iter()
        .filter_map(|fee| {
            let chosen = options.dynamic_fees.get(&fee.name).copied().unwrap_or(0);
            (chosen > 0).then(|| DynamicFeeSelection {
                name: fee.name.clone(),
                unit_price: fee.unit_price,
                quantity: chosen,
            })
        })
        .collect();

    let translation_unit =
        service.base_price + dynamic_fees.iter().map(DynamicFeeSelection::amount).sum::<i64>();
    let translation_price = translation_unit * quantity;
    let certified_copy_price = fees.unit_price(FeeKind::CertifiedCopy) * pages * quantity;
    let registration_price = if options.official {
        fees.unit_price(FeeKind::OfficialRegistration) * quantity
    } else {
        0
    };
    let judiciary_seal_price = if options.judiciary_seal {
        fees.unit_price(FeeKind::JudiciarySeal) * quantity
    } else {
        0
    };
    let foreign_affairs_seal_price = if options.foreign_affairs_seal {
        fees.unit_price(FeeKind::ForeignAffairsSeal) * pages
    } else {
        0
    };
    let extra_copy_price = fees.unit_price(FeeKind::ExtraCopy) * extra;

    let total_price = translation_price
        + certified_copy_price
        + registration_price
        + judiciary_seal_price
        + foreign_affairs_seal_price
        + extra_copy_price;

    tracing::debug!(
        service_id = %service.id,
        quantity = options.quantity,
        extra_copies = options.extra_copies,
        page_count = options.page_count,
        translation_price,
        total_price,
        "Line item priced"
    );

    Ok(InvoiceLineItem {
        id,
        service_id: service.id.clone(),
        service_name: service.name.clone(),
        category: service.category.clone(),
        quantity: options.quantity + options.extra_copies,
        copies: options.quantity,
        page_count: options.page_count,
        extra_copies: options.extra_copies,
        official: options.official,
        judiciary_seal: options.judiciary_seal,
        foreign_affairs_seal: options.foreign_affairs_seal,
        dynamic_fees,
        remark: options
            .remark
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
        translation_price,
        certified_copy_price,
        registration_price,
        judiciary_seal_price,
        foreign_affairs_seal_price,
        extra_copy_price,
        total_price,
    })
}
