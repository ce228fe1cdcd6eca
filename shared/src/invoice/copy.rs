//! Unpacked copies
//!
//! A multi-copy line item is unpacked into unit copies so each copy can be
//! attributed to one person. Copies are plain values: each carries a fresh
//! identity and only the display fields of the item it came from.

use super::line_item::{InvoiceLineItem, LineItemId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Copy identity, distinct from every sibling copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CopyId(pub Uuid);

impl CopyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CopyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CopyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An individually assignable unit of a line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpackedCopy {
    pub id: CopyId,
    /// Item this copy was produced from (display only)
    pub source_item: LineItemId,
    pub service_name: String,
    pub category: String,
    /// 1 for split copies; the item's quantity for items passed through whole
    pub quantity: u32,
    /// `floor(total_price / quantity)` of the source item
    pub unit_price: i64,
    /// Price attributed to this entry
    pub amount: i64,
    /// 1-based position among siblings
    pub copy_index: u32,
    /// Number of siblings produced from the same item
    pub copy_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl UnpackedCopy {
    /// Unit copy `copy_index` of `item`, priced `floor(total_price / quantity)`
    pub fn unit_of(item: &InvoiceLineItem, copy_index: u32) -> Self {
        let quantity = item.quantity.max(1);
        let unit_price = item.total_price.div_euclid(i64::from(quantity));
        Self {
            id: CopyId::new(),
            source_item: item.id,
            service_name: item.service_name.clone(),
            category: item.category.clone(),
            quantity: 1,
            unit_price,
            amount: unit_price,
            copy_index,
            copy_count: quantity,
            remark: item.remark.clone(),
        }
    }

    /// The whole item as a single assignable entry
    pub fn whole(item: &InvoiceLineItem) -> Self {
        Self {
            id: CopyId::new(),
            source_item: item.id,
            service_name: item.service_name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            unit_price: item.total_price.div_euclid(i64::from(item.quantity.max(1))),
            amount: item.total_price,
            copy_index: 1,
            copy_count: 1,
            remark: item.remark.clone(),
        }
    }

    /// Whether this entry came from splitting a multi-copy item
    pub fn is_split(&self) -> bool {
        self.copy_count > 1
    }
}
