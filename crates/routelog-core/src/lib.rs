//! routelog core
//!
//! A small structured logger: timestamped, typed lines to the console, a
//! per-session log file and any number of extra output streams, with
//! per-call routing.
//!
//! ## Usage
//!
//! ```no_run
//! use routelog_core::{log_info, log_warning, Logger, Route};
//! use routelog_core::config::LoggerConfig;
//!
//! let logger = Logger::new(LoggerConfig::new("./logs", "my-service"));
//! logger.init()?;
//!
//! log_info!(logger, "listening on", 8080);
//! log_warning!(logger, "cache cold"; Route::ConsoleOnly);
//!
//! logger.exit()?;
//! # Ok::<(), routelog_core::LoggerError>(())
//! ```
//!
//! Lines look like:
//!
//! - console: `[<trace>]\t<message>` in the severity's color
//! - file: `[<seq>-<HH:mm:ss.mmm>-<SEVERITY>]\t[<trace>]\t<message>`
//! - extra streams: `[<seq>-<SEVERITY>]\t[<trace>]\t<message>`
//!
//! All three layouts are configurable templates, see [`format::Template`].

pub mod error;
pub mod types;
pub mod format;
pub mod config;
pub mod logging;

pub use error::{LoggerError, LoggerResult};

pub use types::{Severity, Route, Color, Record};

pub use format::Template;

pub use config::LoggerConfig;

pub use logging::{
    Log, BoxedLog, SharedLog,
    Logger, NoOpLogger,
    ConsoleWriter, SharedBuffer, OutputStream,
};
