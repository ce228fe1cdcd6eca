//! Logging Infrastructure
//!
//! Structured logging setup: console output by default, daily rolling file
//! output when a log directory is configured.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` takes precedence over `log_level` when set. Calling this more
/// than once is harmless; later calls keep the first subscriber.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "invoice-desk");
            let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
            return;
        }
        let _ = subscriber.try_init();
        tracing::warn!(log_dir = %dir, "Log directory does not exist, logging to stdout");
        return;
    }

    let _ = subscriber.try_init();
}
