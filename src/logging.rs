//! Logging configuration using the tracing ecosystem.
//!
//! The interactive view owns the terminal, so it logs to a daily rolling file.
//! Headless runs (`--sort`) print the table on stdout and log to stderr.
//!
//! Configure the level via `RUST_LOG`:
//! - `RUST_LOG=tablesort=debug` - Every activation, ignored click, and config load
//! - `RUST_LOG=tablesort=trace` - Event-by-event details

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "tablesort=info,warn";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Daily rotating file in the given directory.
    File(PathBuf),
    /// Standard error, without ANSI colors when piped.
    Stderr,
}

impl LogTarget {
    /// Rolling file in the platform log directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the local data directory cannot be determined.
    pub fn default_file() -> anyhow::Result<Self> {
        Ok(Self::File(get_log_directory()?))
    }
}

/// Initialize the logging system.
///
/// The returned guard flushes buffered file output when dropped; keep it alive
/// until shutdown.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already set.
///
/// # Example
///
/// ```no_run
/// use tablesort::logging::{self, LogTarget};
///
/// let _guard = logging::init(LogTarget::Stderr).expect("Failed to initialize logging");
/// ```
pub fn init(target: LogTarget) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let guard = match &target {
        LogTarget::File(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "tablesort.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
            Some(guard)
        }
        LogTarget::Stderr => {
            let subscriber = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .compact(),
                )
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
            None
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tablesort starting up");
    if let LogTarget::File(dir) = &target {
        tracing::debug!(log_dir = %dir.display(), "Log directory");
    }

    Ok(guard)
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("tablesort").join("logs"))
}

/// Get the path where logs are stored, for telling users where to look.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("tablesort shutting down");
}
