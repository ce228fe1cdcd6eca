//! Price catalog loaded once per workflow run

use super::fee_schedule::FixedFeeSchedule;
use crate::services::FeeScheduleProvider;
use crate::utils::validation::MAX_UNIT_PRICE;
use shared::error::{AppError, AppResult};
use shared::models::Service;
use std::collections::HashSet;

/// Read-only snapshot of the service catalog and the fixed fee table
#[derive(Debug, Clone)]
pub struct PriceCatalog {
    services: Vec<Service>,
    fees: FixedFeeSchedule,
}

impl PriceCatalog {
    /// Fetch and validate both tables from the provider
    ///
    /// Provider failures are returned untouched.
    pub fn load(provider: &dyn FeeScheduleProvider) -> AppResult<Self> {
        let services = provider.service_catalog()?;
        let fees = FixedFeeSchedule::from_fees(&provider.fixed_fee_schedule()?)?;
        Self::new(services, fees)
    }

    pub fn new(services: Vec<Service>, fees: FixedFeeSchedule) -> AppResult<Self> {
        let mut ids = HashSet::new();
        for service in &services {
            if !ids.insert(service.id.as_str()) {
                return Err(AppError::catalog(format!(
                    "Service id {} is defined more than once",
                    service.id
                )));
            }
            check_price(&service.id, "base price", service.base_price)?;
            for fee in &service.dynamic_fees {
                check_price(&service.id, &fee.name, fee.unit_price)?;
            }
        }

        tracing::debug!(services = services.len(), "Price catalog loaded");
        Ok(Self { services, fees })
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn fees(&self) -> &FixedFeeSchedule {
        &self.fees
    }
}

fn check_price(service_id: &str, what: &str, price: i64) -> AppResult<()> {
    if !(0..=MAX_UNIT_PRICE).contains(&price) {
        return Err(AppError::catalog(format!(
            "Service {service_id}: {what} out of range: {price}"
        )));
    }
    Ok(())
}
