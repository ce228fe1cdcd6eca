//! Fee schedule providers

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{FixedFee, Service};
use std::path::{Path, PathBuf};

/// Source of the service catalog and the fixed fee table
pub trait FeeScheduleProvider {
    fn service_catalog(&self) -> AppResult<Vec<Service>>;
    fn fixed_fee_schedule(&self) -> AppResult<Vec<FixedFee>>;
}

/// On-disk catalog format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub fixed_fees: Vec<FixedFee>,
}

/// Catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    catalog: CatalogFile,
}

impl InMemoryCatalog {
    pub fn new(services: Vec<Service>, fixed_fees: Vec<FixedFee>) -> Self {
        Self {
            catalog: CatalogFile {
                services,
                fixed_fees,
            },
        }
    }
}

impl From<CatalogFile> for InMemoryCatalog {
    fn from(catalog: CatalogFile) -> Self {
        Self { catalog }
    }
}

impl FeeScheduleProvider for InMemoryCatalog {
    fn service_catalog(&self) -> AppResult<Vec<Service>> {
        Ok(self.catalog.services.clone())
    }

    fn fixed_fee_schedule(&self) -> AppResult<Vec<FixedFee>> {
        Ok(self.catalog.fixed_fees.clone())
    }
}

/// Catalog read from a JSON file on every request
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read(&self) -> AppResult<CatalogFile> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            AppError::catalog(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::catalog(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }
}

impl FeeScheduleProvider for JsonCatalog {
    fn service_catalog(&self) -> AppResult<Vec<Service>> {
        Ok(self.read()?.services)
    }

    fn fixed_fee_schedule(&self) -> AppResult<Vec<FixedFee>> {
        Ok(self.read()?.fixed_fees)
    }
}
