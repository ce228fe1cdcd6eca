//! Fixed Fee Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of globally configured fee, not tied to a specific service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    /// Certified copy, charged per page per copy
    CertifiedCopy,
    /// Official registration, charged per copy
    OfficialRegistration,
    /// Judiciary seal, charged per copy
    JudiciarySeal,
    /// Foreign affairs seal, charged per page
    ForeignAffairsSeal,
    /// Extra copy, charged per extra copy
    ExtraCopy,
}

impl FeeKind {
    /// Every fee kind, in table order
    pub const ALL: [FeeKind; 5] = [
        FeeKind::CertifiedCopy,
        FeeKind::OfficialRegistration,
        FeeKind::JudiciarySeal,
        FeeKind::ForeignAffairsSeal,
        FeeKind::ExtraCopy,
    ];

    /// Position in [`FeeKind::ALL`]
    pub const fn index(self) -> usize {
        match self {
            FeeKind::CertifiedCopy => 0,
            FeeKind::OfficialRegistration => 1,
            FeeKind::JudiciarySeal => 2,
            FeeKind::ForeignAffairsSeal => 3,
            FeeKind::ExtraCopy => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FeeKind::CertifiedCopy => "certified_copy",
            FeeKind::OfficialRegistration => "official_registration",
            FeeKind::JudiciarySeal => "judiciary_seal",
            FeeKind::ForeignAffairsSeal => "foreign_affairs_seal",
            FeeKind::ExtraCopy => "extra_copy",
        }
    }
}

impl fmt::Display for FeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed fee record as supplied by the fee schedule provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFee {
    pub kind: FeeKind,
    pub unit_price: i64,
}

impl FixedFee {
    pub fn new(kind: FeeKind, unit_price: i64) -> Self {
        Self { kind, unit_price }
    }
}
