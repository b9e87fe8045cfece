//! Session log files
//!
//! One file per `init`/`exit` session, named
//! `<project>_log_<YYYY-MM-DD@HH-mm-ss>.log` inside the configured directory.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::LoggerConfig;
use crate::format::stamp;

/// An open session file
pub struct SessionFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl SessionFile {
    /// Create the log directory if needed and open the session file.
    ///
    /// Returns the file and whether the directory was created by this call.
    /// The file is opened in append mode so two sessions started within the
    /// same second share a file instead of truncating it.
    pub fn open(config: &LoggerConfig, now: &DateTime<Local>) -> io::Result<(Self, bool)> {
        let dir = &config.log_dir;
        let dir_created = !dir.is_dir();
        fs::create_dir_all(dir)?;

        let path = dir.join(config.session_file_name(&stamp::session_stamp(now)));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok((
            Self {
                path,
                writer: BufWriter::new(file),
            },
            dir_created,
        ))
    }

    /// Path of the open file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line and flush it to the OS
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }

    /// Flush and close
    pub fn close(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl std::fmt::Debug for SessionFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionFile")
            .field("path", &self.path)
            .finish()
    }
}
