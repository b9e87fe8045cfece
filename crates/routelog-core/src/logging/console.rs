//! Console output

use std::io::{self, Write};

use crate::types::Color;

/// The console side of a logger, stdout unless replaced
pub struct ConsoleWriter {
    writer: Box<dyn Write + Send>,
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl ConsoleWriter {
    /// Write to the process stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write to any byte sink (a capture buffer in tests, stderr, ...)
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// Write one colored line in a single `write_all` so concurrent writers
    /// to the same stream never split it.
    pub fn write_line(&mut self, color: Color, line: &str) {
        let text = format!("{}{}{}\n", color, line, Color::Reset);
        let _ = self.writer.write_all(text.as_bytes());
        let _ = self.writer.flush();
    }
}

impl std::fmt::Debug for ConsoleWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleWriter").finish_non_exhaustive()
    }
}
