//! Shared logging utilities: stdout plus the per-day log file

use crate::errors::{SharedError, SharedResult};
use crate::types::RunId;
use chrono::{DateTime, Local, NaiveDate};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// Directory under `$HOME` that holds the daily log files
pub const LOG_DIR_NAME: &str = "isoc-ams-logs";

/// Default log directory derived from the home directory
pub fn default_log_dir(home: &Path) -> PathBuf {
    home.join(LOG_DIR_NAME)
}

/// Log file for a given day: `<dir>/YYYY-MM-DD.log`
pub fn daily_log_path(log_dir: &Path, date: NaiveDate) -> PathBuf {
    log_dir.join(format!("{}.log", date.format("%Y-%m-%d")))
}

fn env_filter_for(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    format!("ams_sync={base_level},shared={base_level}")
}

/// Initialize tracing with a stdout layer and, when given, a file layer
/// appending to the per-day log.
///
/// The returned guard must be held until the process exits, otherwise
/// buffered lines for the file are dropped.
pub fn init_tracing_with_log_dir(
    log_dir: Option<&Path>,
    log_level: Option<&str>,
) -> SharedResult<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::new(env_filter_for(log_level));

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stdout_layer)
            .try_init()
            .map_err(|e| SharedError::LoggingError { message: e.to_string() })?;
        return Ok(None);
    };

    fs::create_dir_all(log_dir).map_err(|e| SharedError::LoggingError {
        message: format!("cannot create {}: {e}", log_dir.display()),
    })?;
    let log_path = daily_log_path(log_dir, Local::now().date_naive());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| SharedError::LoggingError {
            message: format!("cannot open {}: {e}", log_path.display()),
        })?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SharedError::LoggingError { message: e.to_string() })?;

    Ok(Some(guard))
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Local> = Local::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for run-aware info logging
#[macro_export]
macro_rules! run_info {
    ($run_id:expr, $($arg:tt)*) => {
        tracing::info!(
            run = %$run_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for run-aware warning logging
#[macro_export]
macro_rules! run_warn {
    ($run_id:expr, $($arg:tt)*) => {
        tracing::warn!(
            run = %$run_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for run-aware error logging
#[macro_export]
macro_rules! run_error {
    ($run_id:expr, $($arg:tt)*) => {
        tracing::error!(
            run = %$run_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for run-aware debug logging
#[macro_export]
macro_rules! run_debug {
    ($run_id:expr, $($arg:tt)*) => {
        tracing::debug!(
            run = %$run_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Log a multi-line block (such as a rendered report) one line per event
pub fn log_block(run_id: &RunId, block: &str) {
    for line in block.lines() {
        info!(run = %run_id, timestamp = format_timestamp(), "{}", line);
    }
}

/// Contextual logging helper for startup messages
pub fn log_startup(run_id: &RunId, details: &str) {
    info!(
        run = %run_id,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(run_id: &RunId, context: &str, error: &dyn std::fmt::Display) {
    run_error!(run_id, error = %error, "❌ {} failed: {}", context, error);
}

/// Contextual logging helper for success conditions
pub fn log_success(run_id: &RunId, message: &str) {
    info!(
        run = %run_id,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(run_id: &RunId, action: &str, details: &str) {
    info!(
        run = %run_id,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}
