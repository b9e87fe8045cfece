//! A single formatted-then-discarded log record

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local};

use super::Severity;

/// Everything the templates can reference for one log call
#[derive(Debug, Clone)]
pub struct Record {
    pub severity: Severity,
    /// Caller tag, e.g. `my_app::server.handle`
    pub trace: String,
    /// Fragments joined by single spaces
    pub message: String,
    /// Snapshot of the logger counter at dispatch
    pub seq: u64,
    pub timestamp: DateTime<Local>,
}

impl Record {
    pub fn new(
        severity: Severity,
        trace: impl Into<String>,
        message: impl Into<String>,
        seq: u64,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            severity,
            trace: trace.into(),
            message: message.into(),
            seq,
            timestamp,
        }
    }
}

/// Join message fragments with a single space between each pair
pub fn join_fragments(fragments: &[&dyn fmt::Display]) -> String {
    let mut message = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            message.push(' ');
        }
        let _ = write!(message, "{}", fragment);
    }
    message
}
