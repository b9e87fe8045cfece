//! Log trait definition

use std::fmt::Display;
use std::sync::Arc;

use crate::types::{Route, Severity};

/// Leveled, routed logging
///
/// Implementations:
/// - `Logger`: console, session file and extra output streams
/// - `NoOpLogger`: silent logger for testing
///
/// Only `log` is required; the leveled helpers forward to it.
pub trait Log: Send + Sync {
    /// Log one record.
    ///
    /// `caller` identifies the calling function (see `caller!`), `fragments`
    /// are joined with single spaces, and `route` optionally restricts where
    /// the line goes.
    fn log(&self, severity: Severity, caller: &str, fragments: &[&dyn Display], route: Option<Route>);

    /// Log an info message
    fn info(&self, caller: &str, fragments: &[&dyn Display], route: Option<Route>) {
        self.log(Severity::Info, caller, fragments, route);
    }

    /// Log a success message
    fn success(&self, caller: &str, fragments: &[&dyn Display], route: Option<Route>) {
        self.log(Severity::Success, caller, fragments, route);
    }

    /// Log an error message
    fn error(&self, caller: &str, fragments: &[&dyn Display], route: Option<Route>) {
        self.log(Severity::Error, caller, fragments, route);
    }

    /// Log a warning message
    fn warning(&self, caller: &str, fragments: &[&dyn Display], route: Option<Route>) {
        self.log(Severity::Warning, caller, fragments, route);
    }

    /// Log a debug message
    fn debug(&self, caller: &str, fragments: &[&dyn Display], route: Option<Route>) {
        self.log(Severity::Debug, caller, fragments, route);
    }
}

impl<T: Log + ?Sized> Log for &T {
    fn log(&self, severity: Severity, caller: &str, fragments: &[&dyn Display], route: Option<Route>) {
        (**self).log(severity, caller, fragments, route);
    }
}

impl<T: Log + ?Sized> Log for Box<T> {
    fn log(&self, severity: Severity, caller: &str, fragments: &[&dyn Display], route: Option<Route>) {
        (**self).log(severity, caller, fragments, route);
    }
}

impl<T: Log + ?Sized> Log for Arc<T> {
    fn log(&self, severity: Severity, caller: &str, fragments: &[&dyn Display], route: Option<Route>) {
        (**self).log(severity, caller, fragments, route);
    }
}

/// Type alias for a boxed logger
pub type BoxedLog = Box<dyn Log>;

/// Type alias for an Arc-wrapped logger
pub type SharedLog = Arc<dyn Log>;

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($logger:expr, $severity:expr, $($frag:expr),+ ; $route:expr) => {
        $crate::Log::log(
            &$logger,
            $severity,
            &$crate::caller!(),
            &[$(&$frag as &dyn ::std::fmt::Display),+],
            ::std::option::Option::Some($route),
        )
    };
    ($logger:expr, $severity:expr, $($frag:expr),+) => {
        $crate::Log::log(
            &$logger,
            $severity,
            &$crate::caller!(),
            &[$(&$frag as &dyn ::std::fmt::Display),+],
            ::std::option::Option::None,
        )
    };
}

/// Convenience macros for logging
///
/// ```
/// use routelog_core::{log_info, NoOpLogger, Route};
///
/// let logger = NoOpLogger::new();
/// log_info!(logger, "Not too complex ?", "Maybe"; Route::ConsoleOnly);
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_success {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Success, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Error, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Warning, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_at!($logger, $crate::Severity::Debug, $($rest)+)
    };
}
