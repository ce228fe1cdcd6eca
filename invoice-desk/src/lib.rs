//! Invoice Desk - translation office invoice composition engine
//!
//! # Modules
//!
//! ```text
//! invoice-desk/src/
//! ├── core/        # configuration
//! ├── utils/       # logging, validation helpers
//! ├── services/    # catalog, customer directory, invoice sequence, snapshot sink
//! ├── pricing/     # fee table and per-item price calculator
//! ├── assignment/  # copy unpacker and assignment ledger
//! ├── finance/     # subtotals, discount / emergency / advance, totals
//! ├── workflow/    # step order, shared state, coordinator
//! └── draft.rs     # JSON drafts replayed through the workflow
//! ```

pub mod assignment;
pub mod core;
pub mod draft;
pub mod finance;
pub mod pricing;
pub mod services;
pub mod utils;
pub mod workflow;

pub use core::Config;
pub use draft::{InvoiceDraft, run_draft};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use workflow::{InvoiceSnapshot, InvoiceWorkflow, WorkflowError, WorkflowState};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
