//! Invoice line item types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Line item identity, stable across edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub Uuid);

impl LineItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LineItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Options chosen by the operator when adding or editing a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingOptions {
    /// Number of main copies (>= 1)
    pub quantity: u32,
    /// Pages per copy (>= 1)
    pub page_count: u32,
    /// Additional copies on top of `quantity`
    pub extra_copies: u32,
    /// Official registration requested
    pub official: bool,
    pub judiciary_seal: bool,
    pub foreign_affairs_seal: bool,
    /// Dynamic fee name -> chosen quantity
    pub dynamic_fees: BTreeMap<String, u32>,
    pub remark: Option<String>,
}

impl Default for PricingOptions {
    fn default() -> Self {
        Self {
            quantity: 1,
            page_count: 1,
            extra_copies: 0,
            official: false,
            judiciary_seal: false,
            foreign_affairs_seal: false,
            dynamic_fees: BTreeMap::new(),
            remark: None,
        }
    }
}

/// Dynamic fee resolved against the catalog at pricing time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFeeSelection {
    pub name: String,
    pub unit_price: i64,
    pub quantity: u32,
}

impl DynamicFeeSelection {
    pub fn amount(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// A priced invoice line item
///
/// `total_price` is always the sum of the six sub-prices. The stored
/// `quantity` folds extra copies into the main copy count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: LineItemId,
    pub service_id: String,
    pub service_name: String,
    pub category: String,

    // === Inputs ===
    /// Main copies plus extra copies
    pub quantity: u32,
    /// Main copies as entered by the operator
    pub copies: u32,
    pub page_count: u32,
    pub extra_copies: u32,
    pub official: bool,
    pub judiciary_seal: bool,
    pub foreign_affairs_seal: bool,
    /// Chosen dynamic fees, in catalog order (zero quantities omitted)
    pub dynamic_fees: Vec<DynamicFeeSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,

    // === Computed ===
    pub translation_price: i64,
    pub certified_copy_price: i64,
    pub registration_price: i64,
    pub judiciary_seal_price: i64,
    pub foreign_affairs_seal_price: i64,
    pub extra_copy_price: i64,
    pub total_price: i64,
}

impl InvoiceLineItem {
    /// Sum of every computed sub-price
    pub fn sum_of_parts(&self) -> i64 {
        self.translation_price
            + self.certified_copy_price
            + self.registration_price
            + self.judiciary_seal_price
            + self.foreign_affairs_seal_price
            + self.extra_copy_price
    }

    /// Seal costs (judiciary + foreign affairs)
    pub fn confirmation_price(&self) -> i64 {
        self.judiciary_seal_price + self.foreign_affairs_seal_price
    }

    /// The options this item was priced with, for re-editing
    pub fn options(&self) -> PricingOptions {
        PricingOptions {
            quantity: self.copies,
            page_count: self.page_count,
            extra_copies: self.extra_copies,
            official: self.official,
            judiciary_seal: self.judiciary_seal,
            foreign_affairs_seal: self.foreign_affairs_seal,
            dynamic_fees: self
                .dynamic_fees
                .iter()
                .map(|f| (f.name.clone(), f.quantity))
                .collect(),
            remark: self.remark.clone(),
        }
    }
}
