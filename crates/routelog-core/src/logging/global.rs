//! Process-wide logger facade
//!
//! For hosts that prefer free functions over passing a `Logger` around. The
//! global logger is created on first use from `LoggerConfig::from_env()`; if
//! that config cannot be loaded it falls back to defaults and says so on the
//! console.

use std::io::Write;

use once_cell::sync::Lazy;

use super::logger::Logger;
use super::traits::Log;
use crate::caller;
use crate::config::LoggerConfig;
use crate::error::LoggerResult;
use crate::types::{Route, Severity};

static GLOBAL: Lazy<Logger> = Lazy::new(|| match LoggerConfig::from_env() {
    Ok(config) => Logger::new(config),
    Err(err) => {
        let logger = Logger::new(LoggerConfig::default());
        logger.error(&caller!(), &[&"Config error, using defaults:", &err], Some(Route::ConsoleOnly));
        logger
    }
});

/// The process-wide logger
pub fn logger() -> &'static Logger {
    &GLOBAL
}

/// Replace the global configuration (only while no session is open)
pub fn configure(config: LoggerConfig) -> LoggerResult<()> {
    logger().reconfigure(config)
}

/// Start the global session with the configured defaults
pub fn init() -> LoggerResult<()> {
    logger().init()
}

/// Start the global session with an explicit verbosity and console severities
pub fn init_with(verbosity: Route, severities: impl Into<Vec<Severity>>) -> LoggerResult<()> {
    logger().init_with(verbosity, severities)
}

/// End the global session
pub fn exit() -> LoggerResult<()> {
    logger().exit()
}

/// Register an extra output stream on the global logger
pub fn add_output_stream(stream: impl Write + Send + 'static) {
    logger().add_output_stream(stream);
}

/// Log through the global logger, e.g. `info_log!("ready", port; Route::ConsoleOnly)`
#[macro_export]
macro_rules! info_log {
    ($($rest:tt)+) => {
        $crate::__log_at!($crate::logging::global::logger(), $crate::Severity::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! success_log {
    ($($rest:tt)+) => {
        $crate::__log_at!($crate::logging::global::logger(), $crate::Severity::Success, $($rest)+)
    };
}

#[macro_export]
macro_rules! error_log {
    ($($rest:tt)+) => {
        $crate::__log_at!($crate::logging::global::logger(), $crate::Severity::Error, $($rest)+)
    };
}

#[macro_export]
macro_rules! warning_log {
    ($($rest:tt)+) => {
        $crate::__log_at!($crate::logging::global::logger(), $crate::Severity::Warning, $($rest)+)
    };
}

#[macro_export]
macro_rules! debug_log {
    ($($rest:tt)+) => {
        $crate::__log_at!($crate::logging::global::logger(), $crate::Severity::Debug, $($rest)+)
    };
}
