//! Severity levels and their console colors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;

/// ANSI color codes used on console lines
///
/// Use `Color::Reset` to close a colored line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Reset,
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
}

impl Color {
    /// The raw escape sequence
    pub fn code(&self) -> &'static str {
        match self {
            Color::Reset => "\u{1b}[00m",
            Color::Red => "\u{1b}[31m",
            Color::Green => "\u{1b}[32m",
            Color::Yellow => "\u{1b}[33m",
            Color::Blue => "\u{1b}[34m",
            Color::Purple => "\u{1b}[35m",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Classification of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
    Warning,
    Debug,
}

impl Severity {
    /// Every severity, in declaration order
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Success,
        Severity::Error,
        Severity::Warning,
        Severity::Debug,
    ];

    /// Uppercase label written into file and extra-sink lines
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Success => "SUCCESS",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Debug => "DEBUG",
        }
    }

    /// Console color for this severity
    pub fn color(&self) -> Color {
        match self {
            Severity::Info => Color::Blue,
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
            Severity::Debug => Color::Purple,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "debug" => Ok(Severity::Debug),
            _ => Err(LoggerError::unknown_value("severity", s)),
        }
    }
}

/// Parse a comma-separated severity list, e.g. `"info, error"`
pub fn parse_severity_list(s: &str) -> Result<Vec<Severity>, LoggerError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Severity::from_str)
        .collect()
}
