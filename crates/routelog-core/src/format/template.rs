//! Line templates
//!
//! A template is plain text with single-character `%` directives:
//!
//! | directive | expands to |
//! |-----------|------------|
//! | `%Y` | year |
//! | `%M` | month (2 digits) |
//! | `%D` | day (2 digits) |
//! | `%H` | hour (2 digits) |
//! | `%m` | minute (2 digits) |
//! | `%S` | second (2 digits) |
//! | `%N` | milliseconds (3 digits) |
//! | `%d` | `YYYY-MM-DD@HH-mm-ss` |
//! | `%h` | `HH:mm:ss.mmm` |
//! | `%T` | caller trace |
//! | `%C` | message content |
//! | `%n` | sequence number |
//! | `%t` | severity label |
//!
//! Unknown directives and a trailing lone `%` produce no output. Existing
//! templates depend on this, so it must not become an error.

use std::fmt::Write as _;

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use super::stamp;
use crate::types::Record;

/// Default console template
pub const CONSOLE_FORMAT: &str = "[%T]\t%C";

/// Default session file template
pub const FILE_FORMAT: &str = "[%n-%h-%t]\t[%T]\t%C";

/// Default extra output stream template
pub const EXTRA_FORMAT: &str = "[%n-%t]\t[%T]\t%C";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millis,
    Date,
    Clock,
    Trace,
    Content,
    Seq,
    Severity,
}

impl Directive {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'Y' => Directive::Year,
            'M' => Directive::Month,
            'D' => Directive::Day,
            'H' => Directive::Hour,
            'm' => Directive::Minute,
            'S' => Directive::Second,
            'N' => Directive::Millis,
            'd' => Directive::Date,
            'h' => Directive::Clock,
            'T' => Directive::Trace,
            'C' => Directive::Content,
            'n' => Directive::Seq,
            't' => Directive::Severity,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Directive(Directive),
}

/// A parsed line template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template. Never fails; see the module docs for the lenient rules.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let Some(directive) = chars.next().and_then(Directive::from_char) else {
                continue;
            };
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Directive(directive));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { source, segments }
    }

    /// The template source text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Expand the template for one record
    pub fn render(&self, record: &Record) -> String {
        let now = &record.timestamp;
        let mut out = String::with_capacity(self.source.len() + record.message.len() + 32);

        for segment in &self.segments {
            let directive = match segment {
                Segment::Literal(text) => {
                    out.push_str(text);
                    continue;
                }
                Segment::Directive(d) => *d,
            };
            let _ = match directive {
                Directive::Year => write!(out, "{}", now.year()),
                Directive::Month => write!(out, "{:02}", now.month()),
                Directive::Day => write!(out, "{:02}", now.day()),
                Directive::Hour => write!(out, "{:02}", now.hour()),
                Directive::Minute => write!(out, "{:02}", now.minute()),
                Directive::Second => write!(out, "{:02}", now.second()),
                Directive::Millis => write!(out, "{:03}", stamp::millis(now)),
                Directive::Date => write!(out, "{}", stamp::session_stamp(now)),
                Directive::Clock => write!(out, "{}", stamp::clock_stamp(now)),
                Directive::Trace => write!(out, "{}", record.trace),
                Directive::Content => write!(out, "{}", record.message),
                Directive::Seq => write!(out, "{}", record.seq),
                Directive::Severity => write!(out, "{}", record.severity.label()),
            };
        }
        out
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::parse(source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.source
    }
}
