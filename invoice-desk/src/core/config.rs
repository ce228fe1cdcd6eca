/// Engine configuration
///
/// # Environment variables
///
/// Every setting can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CATALOG_PATH | catalog.json | Fee schedule file used by the binary |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | (unset) | Enables daily rolling log files |
/// | MISC_CATEGORY | other | Service category that is never unpacked |
/// | SAVE_CUSTOMER_ON_ADVANCE | false | Save the customer when leaving the first step |
/// | REQUIRE_FULL_ASSIGNMENT | false | Block leaving Assignment while copies are unassigned |
/// | INVOICE_NUMBER_PREFIX | INV- | Prefix for the counter invoice sequence |
///
/// # Example
///
/// ```ignore
/// CATALOG_PATH=/srv/office/catalog.json LOG_LEVEL=debug invoice-desk draft.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fee schedule file (JSON)
    pub catalog_path: String,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Log directory; stdout only when unset
    pub log_dir: Option<String>,
    /// Category tag of services that are never split into copies
    pub misc_category: String,
    /// Persist the customer through the directory before leaving CustomerInfo
    pub save_customer_on_advance: bool,
    /// Refuse to leave Assignment while `__unassigned__` is non-empty
    pub require_full_assignment: bool,
    /// Prefix used by the counter invoice sequence
    pub invoice_number_prefix: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            catalog_path: std::env::var("CATALOG_PATH").unwrap_or(defaults.catalog_path),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            misc_category: std::env::var("MISC_CATEGORY").unwrap_or(defaults.misc_category),
            save_customer_on_advance: std::env::var("SAVE_CUSTOMER_ON_ADVANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.save_customer_on_advance),
            require_full_assignment: std::env::var("REQUIRE_FULL_ASSIGNMENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.require_full_assignment),
            invoice_number_prefix: std::env::var("INVOICE_NUMBER_PREFIX")
                .unwrap_or(defaults.invoice_number_prefix),
        }
    }

    /// Override selected settings, starting from defaults
    ///
    /// Used by tests so they never depend on the process environment.
    pub fn with_overrides(misc_category: impl Into<String>, require_full_assignment: bool) -> Self {
        Self {
            misc_category: misc_category.into(),
            require_full_assignment,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: "catalog.json".into(),
            log_level: "info".into(),
            log_dir: None,
            misc_category: "other".into(),
            save_customer_on_advance: false,
            require_full_assignment: false,
            invoice_number_prefix: "INV-".into(),
        }
    }
}
