//! Fixed fee table

use crate::utils::validation::MAX_UNIT_PRICE;
use shared::error::{AppError, AppResult};
use shared::models::{FeeKind, FixedFee};

/// Unit price for every [`FeeKind`], indexed by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFeeSchedule {
    prices: [i64; FeeKind::ALL.len()],
}

impl FixedFeeSchedule {
    /// Build the table from provider records
    ///
    /// Every kind must appear exactly once with a price in
    /// `0..=MAX_UNIT_PRICE`.
    pub fn from_fees(fees: &[FixedFee]) -> AppResult<Self> {
        let mut prices: [Option<i64>; FeeKind::ALL.len()] = [None; FeeKind::ALL.len()];

        for fee in fees {
            if !(0..=MAX_UNIT_PRICE).contains(&fee.unit_price) {
                return Err(AppError::catalog(format!(
                    "Fixed fee {} out of range: {}",
                    fee.kind, fee.unit_price
                )));
            }
            let slot = &mut prices[fee.kind.index()];
            if slot.is_some() {
                return Err(AppError::catalog(format!(
                    "Fixed fee {} is defined more than once",
                    fee.kind
                )));
            }
            *slot = Some(fee.unit_price);
        }

        let missing: Vec<&str> = FeeKind::ALL
            .iter()
            .filter(|kind| prices[kind.index()].is_none())
            .map(|kind| kind.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::catalog(format!(
                "Fixed fee schedule is missing: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            prices: prices.map(|p| p.unwrap_or_default()),
        })
    }

    /// Build directly from prices in [`FeeKind::ALL`] order
    pub const fn from_prices(prices: [i64; FeeKind::ALL.len()]) -> Self {
        Self { prices }
    }

    pub fn unit_price(&self, kind: FeeKind) -> i64 {
        self.prices[kind.index()]
    }

    /// `(kind, unit_price)` in table order
    pub fn iter(&self) -> impl Iterator<Item = (FeeKind, i64)> + '_ {
        FeeKind::ALL.iter().map(|&kind| (kind, self.unit_price(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    fn full_table() -> Vec<FixedFee> {
        vec![
            FixedFee::new(FeeKind::CertifiedCopy, 10_000),
            FixedFee::new(FeeKind::OfficialRegistration, 50_000),
            FixedFee::new(FeeKind::JudiciarySeal, 30_000),
            FixedFee::new(FeeKind::ForeignAffairsSeal, 40_000),
            FixedFee::new(FeeKind::ExtraCopy, 20_000),
        ]
    }

    #[test]
    fn test_from_fees_any_order() {
        let mut fees = full_table();
        fees.reverse();
        let schedule = FixedFeeSchedule::from_fees(&fees).unwrap();
        assert_eq!(schedule.unit_price(FeeKind::CertifiedCopy), 10_000);
        assert_eq!(schedule.unit_price(FeeKind::ExtraCopy), 20_000);
        assert_eq!(schedule.iter().count(), 5);
    }

    #[test]
    fn test_missing_kind_rejected() {
        let fees: Vec<FixedFee> = full_table()
            .into_iter()
            .filter(|f| f.kind != FeeKind::JudiciarySeal)
            .collect();
        let err = FixedFeeSchedule::from_fees(&fees).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
        assert!(err.message.contains("judiciary_seal"));
    }

    #[test]
    fn test_duplicate_and_negative_rejected() {
        let mut fees = full_table();
        fees.push(FixedFee::new(FeeKind::ExtraCopy, 1));
        assert!(FixedFeeSchedule::from_fees(&fees).is_err());

        let mut fees = full_table();
        fees[0].unit_price = -1;
        assert!(FixedFeeSchedule::from_fees(&fees).is_err());
    }

    #[test]
    fn test_price_above_limit_rejected() {
        let mut fees = full_table();
        fees[3].unit_price = MAX_UNIT_PRICE;
        assert!(FixedFeeSchedule::from_fees(&fees).is_ok());

        fees[3].unit_price = MAX_UNIT_PRICE + 1;
        let err = FixedFeeSchedule::from_fees(&fees).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
        assert!(err.message.contains("foreign_affairs_seal"));

        let saturated: Vec<FixedFee> = FeeKind::ALL
            .iter()
            .map(|&kind| FixedFee::new(kind, i64::MAX))
            .collect();
        assert!(FixedFeeSchedule::from_fees(&saturated).is_err());
    }
}
