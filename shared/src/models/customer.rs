//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
///
/// The customer plus every companion form the *people set* of an invoice;
/// person names key the assignment buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Directory id, `None` until the customer has been saved
    #[serde(default)]
    pub id: Option<i64>,
    /// National id / passport number used for lookups
    pub identifier: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub companions: Vec<Companion>,
}

/// A secondary person billed on the same invoice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Companion {
    pub name: String,
    #[serde(default)]
    pub identifier: Option<String>,
}

impl Customer {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    /// Builder-style companion registration
    pub fn with_companion(mut self, name: impl Into<String>, identifier: Option<String>) -> Self {
        self.companions.push(Companion {
            name: name.into(),
            identifier,
        });
        self
    }

    /// Customer followed by companions, in display order
    pub fn people(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.companions.iter().map(|c| c.name.as_str()))
            .collect()
    }

    /// `1 + companions`
    pub fn number_of_people(&self) -> usize {
        1 + self.companions.len()
    }
}
