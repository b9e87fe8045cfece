//! Logging: the routing `Logger`, its outputs and a global facade
//!
//! - `Logger`: console + session file + extra streams, one session at a time
//! - `Log`: trait with leveled helpers, implemented by `Logger` and `NoOpLogger`
//! - `global`: process-wide `Logger` and the `info_log!` family of macros

pub mod caller;
mod traits;
mod noop;
mod console;
mod file_logger;
mod sinks;
mod logger;
pub mod global;

pub use traits::{Log, BoxedLog, SharedLog};
pub use noop::NoOpLogger;
pub use console::ConsoleWriter;
pub use file_logger::SessionFile;
pub use sinks::{OutputStream, SharedBuffer};
pub use logger::Logger;
