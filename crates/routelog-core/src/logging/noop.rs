//! No-op logger implementation

use std::fmt::Display;

use super::traits::Log;
use crate::types::{Route, Severity};

/// A logger that does nothing
///
/// Useful for testing or when a host wants to switch logging off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    /// Create a new no-op logger
    pub fn new() -> Self {
        Self
    }
}

impl Log for NoOpLogger {
    fn log(&self, _severity: Severity, _caller: &str, _fragments: &[&dyn Display], _route: Option<Route>) {}
}
