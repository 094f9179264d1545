//! Shared logging utilities for consistent tracing across the service

use crate::errors::{SharedError, SharedResult};
use crate::types::Component;
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{Level, error, info};

/// Log file receiving every event except HTTP access lines
pub const SERVER_LOG: &str = "server.log";

/// Log file receiving HTTP access lines
pub const HTTP_LOG: &str = "http.log";

/// Target prefix used by `tower_http::trace` events
const HTTP_TRACE_TARGET: &str = "tower_http::trace";

/// Where and how verbosely to log
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory holding `server.log` and `http.log` (stdout only if unset)
    pub log_dir: Option<PathBuf>,
    /// Base level (trace, debug, info, warn, error)
    pub level: String,
}

impl LogConfig {
    pub fn new(log_dir: Option<PathBuf>, level: impl Into<String>) -> Self {
        Self {
            log_dir,
            level: level.into(),
        }
    }

    /// Filter directives for the workspace crates at the configured level
    pub fn filter_directives(&self) -> String {
        let base_level = &self.level;
        format!(
            "webserver={base_level},tally={base_level},shared={base_level},tower_http={base_level},axum={base_level}"
        )
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(None, "info")
    }
}

/// Create the log directory if it does not exist yet
pub fn ensure_log_directory(dir: &Path) -> SharedResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| SharedError::LogDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

/// Open a log file for appending, creating it when missing
pub fn open_log_file(path: &Path) -> SharedResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SharedError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Initialize the global tracing subscriber
///
/// Stdout always receives everything allowed by the level filter. With a log
/// directory configured, HTTP access events from `tower_http::trace` go to
/// `http.log` and all remaining events go to `server.log`.
pub fn init_tracing(config: &LogConfig) -> SharedResult<()> {
    use tracing_subscriber::{EnvFilter, Layer, filter::Targets, filter::filter_fn, fmt, prelude::*};

    let directives = config.filter_directives();

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(EnvFilter::new(&directives));

    let file_layers = match &config.log_dir {
        Some(dir) => {
            ensure_log_directory(dir)?;
            let server_file = open_log_file(&dir.join(SERVER_LOG))?;
            let http_file = open_log_file(&dir.join(HTTP_LOG))?;

            let server_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(server_file))
                .with_filter(EnvFilter::new(&directives))
                .with_filter(filter_fn(|metadata| !metadata.target().starts_with(HTTP_TRACE_TARGET)));

            let http_layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(http_file))
                .with_filter(Targets::new().with_target(HTTP_TRACE_TARGET, Level::INFO));

            Some(server_layer.and_then(http_layer))
        }
        None => None,
    };

    println!("📊 Log level: {directives}");

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layers)
        .try_init()
        .map_err(|e| SharedError::TracingInit {
            message: e.to_string(),
        })
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for component-aware info logging
#[macro_export]
macro_rules! component_info {
    ($component:expr, $($arg:tt)*) => {
        tracing::info!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware warning logging
#[macro_export]
macro_rules! component_warn {
    ($component:expr, $($arg:tt)*) => {
        tracing::warn!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware error logging
#[macro_export]
macro_rules! component_error {
    ($component:expr, $($arg:tt)*) => {
        tracing::error!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware debug logging
#[macro_export]
macro_rules! component_debug {
    ($component:expr, $($arg:tt)*) => {
        tracing::debug!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(component: Component, details: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(component: Component, reason: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(component: Component, context: &str, error: &dyn std::fmt::Display) {
    error!(
        component = %component,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(component: Component, message: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}
