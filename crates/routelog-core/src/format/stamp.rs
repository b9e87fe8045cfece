//! Timestamp renderings shared by file names and templates

use chrono::{DateTime, Local, Timelike};

/// `YYYY-MM-DD@HH-mm-ss`, used in session file names and `%d`
pub fn session_stamp(now: &DateTime<Local>) -> String {
    now.format("%Y-%m-%d@%H-%M-%S").to_string()
}

/// `HH:mm:ss.mmm`, used by `%h`
pub fn clock_stamp(now: &DateTime<Local>) -> String {
    format!("{}.{:03}", now.format("%H:%M:%S"), millis(now))
}

/// Milliseconds within the second, clamped for leap seconds
pub fn millis(now: &DateTime<Local>) -> u32 {
    (now.nanosecond() / 1_000_000).min(999)
}
