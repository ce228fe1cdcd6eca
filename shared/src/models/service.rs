//! Service Catalog Model

use serde::{Deserialize, Serialize};

/// Billable service entity
///
/// Immutable for the duration of one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Category tag (e.g. `certificate`, `academic`, `other`)
    pub category: String,
    /// Base translation price per copy
    pub base_price: i64,
    /// Named per-unit add-ons, in catalog order
    #[serde(default)]
    pub dynamic_fees: Vec<DynamicFee>,
}

/// Named, quantity-multiplied add-on price attached to a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFee {
    pub name: String,
    pub unit_price: i64,
}

impl Service {
    /// Find a dynamic fee by its catalog name
    pub fn dynamic_fee(&self, name: &str) -> Option<&DynamicFee> {
        self.dynamic_fees.iter().find(|f| f.name == name)
    }
}
