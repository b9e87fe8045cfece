//! Core types shared by the formatter and the logger

mod severity;
mod route;
mod record;

pub use severity::{Severity, Color, parse_severity_list};
pub use route::{Route, Delivery};
pub use record::{Record, join_fragments};
