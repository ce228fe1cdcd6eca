//! Item unpacker

use shared::invoice::{InvoiceLineItem, UnpackedCopy};

/// Whether `item` is split into unit copies
///
/// Only items with more than one copy outside the miscellaneous category are
/// split; everything else passes through whole.
pub fn should_split(item: &InvoiceLineItem, misc_category: &str) -> bool {
    item.quantity > 1 && !item.category.eq_ignore_ascii_case(misc_category)
}

/// Unpack one item
///
/// A split item yields exactly `quantity` copies priced
/// `floor(total_price / quantity)` each; the division remainder is dropped.
pub fn unpack_item(item: &InvoiceLineItem, misc_category: &str) -> Vec<UnpackedCopy> {
    if should_split(item, misc_category) {
        (1..=item.quantity)
            .map(|index| UnpackedCopy::unit_of(item, index))
            .collect()
    } else {
        vec![UnpackedCopy::whole(item)]
    }
}

/// Unpack every item, preserving item order
pub fn unpack_items(items: &[InvoiceLineItem], misc_category: &str) -> Vec<UnpackedCopy> {
    let copies: Vec<UnpackedCopy> = items
        .iter()
        .flat_map(|item| unpack_item(item, misc_category))
        .collect();

    tracing::debug!(items = items.len(), copies = copies.len(), "Line items unpacked");
    copies
}
