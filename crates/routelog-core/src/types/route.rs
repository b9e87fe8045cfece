//! Output routing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;

/// Where log lines go
///
/// Used both as the logger's verbosity and as a per-call override. As an
/// override, `FileAndConsole` behaves like no override at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    FileOnly,
    ConsoleOnly,
    #[default]
    FileAndConsole,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::FileOnly => "file_only",
            Route::ConsoleOnly => "console_only",
            Route::FileAndConsole => "file_and_console",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "file_only" | "file" => Ok(Route::FileOnly),
            "console_only" | "console" => Ok(Route::ConsoleOnly),
            "file_and_console" | "both" => Ok(Route::FileAndConsole),
            _ => Err(LoggerError::unknown_value("route", s)),
        }
    }
}

/// Per-call delivery decision for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub console: bool,
    pub file: bool,
    pub extra: bool,
}

impl Delivery {
    /// Decide which outputs a record reaches.
    ///
    /// `shown` is whether the record's severity is enabled; it only gates the
    /// console.
    pub fn resolve(verbosity: Route, route: Option<Route>, shown: bool) -> Self {
        let file_only = route == Some(Route::FileOnly);
        let console_only = route == Some(Route::ConsoleOnly);

        Self {
            console: !file_only && verbosity != Route::FileOnly && shown,
            file: !console_only && verbosity != Route::ConsoleOnly,
            extra: !file_only && !console_only && verbosity == Route::FileAndConsole,
        }
    }
}
