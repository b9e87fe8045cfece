//! The routing logger
//!
//! A `Logger` owns one session at a time: `init` opens a session file, every
//! log call formats its record once per output and dispatches it to the
//! console, the file and the extra output streams as routing allows, and
//! `exit` closes the file.
//!
//! All mutable state sits behind one mutex. A single dispatch holds it for
//! the whole "snapshot counter, write outputs, bump counter" step, so file
//! lines never interleave and sequence numbers are never reused. Failures
//! found during a dispatch are reported as console-only error records after
//! the lock is released.

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use parking_lot::Mutex;

use super::console::ConsoleWriter;
use super::file_logger::SessionFile;
use super::sinks::{self, OutputStream};
use super::traits::Log;
use crate::caller;
use crate::config::LoggerConfig;
use crate::error::{LoggerError, LoggerResult};
use crate::types::{join_fragments, Delivery, Record, Route, Severity};

struct LogState {
    config: LoggerConfig,
    file: Option<SessionFile>,
    counter: u64,
    verbosity: Route,
    enabled: Vec<Severity>,
    console: ConsoleWriter,
    extra: Vec<OutputStream>,
}

impl LogState {
    /// Deliver one record and bump the counter. Returns failure descriptions
    /// to be reported once the lock is gone.
    fn dispatch(&mut self, severity: Severity, caller: &str, message: String, route: Option<Route>) -> Vec<String> {
        let delivery = Delivery::resolve(self.verbosity, route, self.enabled.contains(&severity));
        let record = Record::new(severity, caller, message, self.counter, Local::now());
        let mut failures = Vec::new();

        if delivery.console {
            let line = self.config.formats.console.render(&record);
            self.console.write_line(severity.color(), &line);
        }

        if delivery.file {
            match self.file.as_mut() {
                Some(file) => {
                    let line = self.config.formats.file.render(&record);
                    if let Err(err) = file.write_line(&line) {
                        failures.push(format!("Log file write failed: {}", err));
                    }
                }
                None => failures.push(LoggerError::NotInitialized.to_string()),
            }
        }

        if delivery.extra && !self.extra.is_empty() {
            let line = format!("{}\n", self.config.formats.extra.render(&record));
            for err in sinks::broadcast(&mut self.extra, &line) {
                failures.push(format!("Output stream write failed: {}", err));
            }
        }

        self.counter += 1;
        failures
    }
}

/// Console + session file + extra stream logger
///
/// # Example
///
/// ```no_run
/// use routelog_core::{log_info, log_debug, Logger, Route};
/// use routelog_core::config::LoggerConfig;
///
/// let logger = Logger::new(LoggerConfig::default());
/// logger.init().ok();
///
/// log_debug!(logger, "Is it simple ?", "YES");
/// log_info!(logger, "Not too complex ?", "Maybe"; Route::ConsoleOnly);
///
/// logger.exit().ok();
/// ```
pub struct Logger {
    state: Mutex<LogState>,
}

impl Logger {
    /// Create an uninitialized logger writing its console lines to stdout
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_console(config, ConsoleWriter::stdout())
    }

    /// Create an uninitialized logger with a custom console writer
    pub fn with_console(config: LoggerConfig, console: ConsoleWriter) -> Self {
        let verbosity = config.verbosity;
        let enabled = config.severities.clone();
        Self {
            state: Mutex::new(LogState {
                config,
                file: None,
                counter: 0,
                verbosity,
                enabled,
                console,
                extra: Vec::new(),
            }),
        }
    }

    /// Start a session with the configured verbosity and severities
    pub fn init(&self) -> LoggerResult<()> {
        let (verbosity, severities) = {
            let state = self.state.lock();
            (state.config.verbosity, state.config.severities.clone())
        };
        self.init_with(verbosity, severities)
    }

    /// Start a session.
    ///
    /// Creates the log directory if needed and opens a new session file.
    /// Calling it while a session is open only logs a warning and returns
    /// `Ok(())`. On I/O failure the error is logged to the console, the
    /// logger stays uninitialized and the error is returned.
    pub fn init_with(&self, verbosity: Route, severities: impl Into<Vec<Severity>>) -> LoggerResult<()> {
        let caller = caller!();
        let mut state = self.state.lock();

        if state.file.is_some() {
            drop(state);
            self.warning(&caller, &[&"Log already init"], None);
            return Ok(());
        }

        state.verbosity = verbosity;
        state.enabled = severities.into();

        let opened = state
            .config
            .validate()
            .and_then(|_| SessionFile::open(&state.config, &Local::now()).map_err(LoggerError::from));

        match opened {
            Ok((file, dir_created)) => {
                state.file = Some(file);
                state.counter = 0;

                let mut failures = state.dispatch(Severity::Info, &caller, "Log start".to_string(), Some(Route::FileOnly));
                if dir_created {
                    failures.extend(state.dispatch(Severity::Warning, &caller, "Log directory created".to_string(), None));
                }
                drop(state);

                self.report(&caller, failures);
                Ok(())
            }
            Err(err) => {
                drop(state);
                self.error(&caller, &[&err], Some(Route::ConsoleOnly));
                self.error(&caller, &[&"Log error"], None);
                Err(err)
            }
        }
    }

    /// End the session: write the end record and close the file.
    ///
    /// Without an open session this logs a console error and returns
    /// `Err(LoggerError::NotInitialized)`.
    pub fn exit(&self) -> LoggerResult<()> {
        let caller = caller!();
        let mut state = self.state.lock();

        if state.file.is_none() {
            drop(state);
            self.error(&caller, &[&"Please init before exit"], Some(Route::ConsoleOnly));
            return Err(LoggerError::NotInitialized);
        }

        let failures = state.dispatch(Severity::Info, &caller, "End log".to_string(), Some(Route::FileOnly));
        let file = state.file.take();
        drop(state);

        self.report(&caller, failures);
        if let Some(file) = file {
            if let Err(err) = file.close() {
                self.error(&caller, &[&err], Some(Route::ConsoleOnly));
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Register an extra output stream.
    ///
    /// It receives every record logged with no route override while the
    /// verbosity is `FileAndConsole`, for the rest of the logger's life.
    pub fn add_output_stream(&self, stream: impl Write + Send + 'static) {
        self.state.lock().extra.push(Box::new(stream));
    }

    /// Number of registered extra output streams
    pub fn output_stream_count(&self) -> usize {
        self.state.lock().extra.len()
    }

    /// Replace the configuration. Only allowed while no session is open.
    pub fn reconfigure(&self, config: LoggerConfig) -> LoggerResult<()> {
        let mut state = self.state.lock();
        if state.file.is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }
        state.verbosity = config.verbosity;
        state.enabled = config.severities.clone();
        state.config = config;
        Ok(())
    }

    /// Current configuration
    pub fn config(&self) -> LoggerConfig {
        self.state.lock().config.clone()
    }

    /// Whether a session is open
    pub fn is_initialized(&self) -> bool {
        self.state.lock().file.is_some()
    }

    /// Path of the open session file
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.state.lock().file.as_ref().map(|f| f.path().to_path_buf())
    }

    /// Sequence number the next record will get
    pub fn counter(&self) -> u64 {
        self.state.lock().counter
    }

    /// Current verbosity
    pub fn verbosity(&self) -> Route {
        self.state.lock().verbosity
    }

    fn report(&self, caller: &str, failures: Vec<String>) {
        for failure in failures {
            self.error(caller, &[&failure], Some(Route::ConsoleOnly));
        }
    }
}

impl Log for Logger {
    fn log(&self, severity: Severity, caller: &str, fragments: &[&dyn Display], route: Option<Route>) {
        // Display impls run before locking so they may log themselves.
        let message = join_fragments(fragments);
        let failures = self.state.lock().dispatch(severity, caller, message, route);
        self.report(caller, failures);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Logger")
            .field("config", &state.config)
            .field("file", &state.file)
            .field("counter", &state.counter)
            .field("verbosity", &state.verbosity)
            .field("enabled", &state.enabled)
            .field("extra_streams", &state.extra.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::SharedBuffer;
    use crate::{log_debug, log_error, log_info, log_success, log_warning};
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::tempdir;

    const RESET: &str = "\u{1b}[00m";

    fn test_logger(root: &Path) -> (Logger, SharedBuffer) {
        let console = SharedBuffer::new();
        let config = LoggerConfig::new(root.join("logs"), "project");
        let logger = Logger::with_console(config, ConsoleWriter::new(console.clone()));
        (logger, console)
    }

    fn session_files(root: &Path) -> Vec<PathBuf> {
        match fs::read_dir(root.join("logs")) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn session_lines(root: &Path) -> Vec<String> {
        let files = session_files(root);
        assert_eq!(files.len(), 1, "expected exactly one session file");
        fs::read_to_string(&files[0])
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Split `[<seq>-<HH:mm:ss.mmm>-<SEVERITY>]\t[<trace>]\t<message>`
    fn parse_file_line(line: &str) -> Option<(u64, String, String, String)> {
        let (head, rest) = line.strip_prefix('[')?.split_once("]\t[")?;
        let (trace, message) = rest.split_once("]\t")?;
        let mut parts = head.splitn(3, '-');
        let seq = parts.next()?.parse().ok()?;
        let clock = parts.next()?;
        let severity = parts.next()?;
        let valid_clock = clock.len() == 12
            && clock.char_indices().all(|(i, c)| match i {
                2 | 5 => c == ':',
                8 => c == '.',
                _ => c.is_ascii_digit(),
            });
        if !valid_clock {
            return None;
        }
        Some((seq, severity.to_string(), trace.to_string(), message.to_string()))
    }

    #[test]
    fn test_full_session_writes_eight_lines() {
        let dir = tempdir().unwrap();
        let (logger, _console) = test_logger(dir.path());

        logger.init().unwrap();
        log_info!(logger, "Info message");
        log_success!(logger, "Success message");
        log_error!(logger, "Error message");
        log_warning!(logger, "Warning message");
        log_debug!(logger, "Debug message");
        logger.exit().unwrap();

        let lines = session_lines(dir.path());
        assert_eq!(lines.len(), 8);

        let parsed: Vec<_> = lines.iter().map(|l| parse_file_line(l).unwrap()).collect();
        assert_eq!(parsed[0].3, "Log start");
        assert_eq!(parsed[1].1, "WARNING");
        assert_eq!(parsed[1].3, "Log directory created");
        assert_eq!(parsed[2].1, "INFO");
        assert_eq!(parsed[3].1, "SUCCESS");
        assert_eq!(parsed[4].1, "ERROR");
        assert_eq!(parsed[5].1, "WARNING");
        assert_eq!(parsed[6].1, "DEBUG");
        assert_eq!(parsed[7].3, "End log");
        assert_eq!(parsed[2].2, "routelog_core::logging::logger::tests.test_full_session_writes_eight_lines");
        assert!(parsed[0].2.ends_with("Logger.init_with"));

        for (i, p) in parsed.iter().enumerate() {
            assert_eq!(p.0, i as u64);
        }
    }

    #[test]
    fn test_existing_directory_skips_creation_warning() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        let (logger, console) = test_logger(dir.path());

        logger.init().unwrap();
        logger.exit().unwrap();

        let lines = session_lines(dir.path());
        assert_eq!(lines.len(), 2);
        // start and end are file-only
        assert_eq!(console.contents(), "");
    }

    #[test]
    fn test_double_init_warns_and_keeps_one_file() {
        let dir = tempdir().unwrap();
        let (logger, console) = test_logger(dir.path());

        logger.init().unwrap();
        let path = logger.log_file_path().unwrap();
        logger.init().unwrap();

        assert!(logger.is_initialized());
        assert_eq!(logger.log_file_path().unwrap(), path);
        assert_eq!(session_files(dir.path()).len(), 1);

        let warning = console
            .lines()
            .into_iter()
            .find(|l| l.contains("Log already init"))
            .expect("warning on console");
        assert!(warning.starts_with("\u{1b}[33m["));
        assert!(warning.ends_with(RESET));

        logger.exit().unwrap();
    }

    #[test]
    fn test_exit_without_init_is_safe() {
        let dir = tempdir().unwrap();
        let (logger, console) = test_logger(dir.path());

        let err = logger.exit().unwrap_err();
        assert!(matches!(err, LoggerError::NotInitialized));
        assert!(console.contents().contains("Please init before exit"));
        assert!(!dir.path().join("logs").exists());
        assert!(!logger.is_initialized());
    }

    #[test]
    fn test_log_without_init_reports_and_drops_file_line() {
        let dir = tempdir().unwrap();
        let (logger, console) = test_logger(dir.path());

        log_info!(logger, "early");

        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("early"));
        assert!(lines[1].starts_with("\u{1b}[31m"));
        assert!(lines[1].contains("Please init logger"));
        assert!(!dir.path().join("logs").exists());
        // the record and its failure report each count
        assert_eq!(logger.counter(), 2);
    }

    #[test]
    fn test_console_line_format() {
        let dir = tempdir().unwrap();
        let (logger, console) = test_logger(dir.path());
        logger.init().unwrap();
        console.clear();

        logger.success("app::jobs.run", &[&"done", &3], None);

        assert_eq!(console.contents(), "\u{1b}[32m[app::jobs.run]\tdone 3\u{1b}[00m\n");
        logger.exit().unwrap();
    }

    #[test]
    fn test_route_overrides_are_exclusive() {
        let dir = tempdir().unwrap();
        let (logger, console) = test_logger(dir.path());
        let extra = SharedBuffer::new();
        logger.add_output_stream(extra.clone());

        logger.init().unwrap();
        console.clear();
        extra.clear();

        log_info!(logger, "console only"; Route::ConsoleOnly);
        log_info!(logger, "file only"; Route::FileOnly);
        log_info!(logger, "everywhere"; Route::FileAndConsole);
        logger.exit().unwrap();

        let file = session_lines(dir.path()).join("\n");
        assert!(!file.contains("console only"));
        assert!(file.contains("file only"));
        assert!(file.contains("everywhere"));

        let out = console.contents();
        assert!(out.contains("console only"));
        assert!(!out.contains("file only"));
        assert!(out.contains("everywhere"));

        let streamed = extra.contents();
        assert!(!streamed.contains("console only"));
        assert!(!streamed.contains("file only"));
        assert!(streamed.contains("everywhere"));
    }

    #[test]
    fn test_extra_stream_format() {
        let dir = tempdir().unwrap();
        let (logger, _console) = test_logger(dir.path());
        let extra = SharedBuffer::new();
        logger.add_output_stream(extra.clone());
        assert_eq!(logger.output_stream_count(), 1);

        logger.init().unwrap();
        logger.debug("app.main", &[&"payload"], None);
        logger.exit().unwrap();

        // seq 0 is the file-only start record
        let contents = extra.contents();
        let lines: Vec<_> = contents.split_inclusive('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[1-WARNING]\t[routelog_core::logging::logger::"));
        assert!(lines[0].ends_with("Logger.init_with]\tLog directory created\n"));
        assert_eq!(lines[1], "[2-DEBUG]\t[app.main]\tpayload\n");
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failing_stream_is_reported_and_others_still_receive() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        let (logger, console) = test_logger(dir.path());
        let healthy = SharedBuffer::new();
        logger.add_output_stream(Broken);
        logger.add_output_stream(healthy.clone());

        logger.init().unwrap();
        log_info!(logger, "fan out");
        logger.exit().unwrap();

        assert!(healthy.contents().contains("fan out"));
        let errors: Vec<_> = console
            .lines()
            .into_iter()
            .filter(|l| l.contains("stream gone"))
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("\u{1b}[31m"));

        // the error report is console-only
        let file = session_lines(dir.path()).join("\n");
        assert!(!file.contains("stream gone"));
    }

    #[test]
    fn test_init_failure_leaves_logger_uninitialized() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file in the way").unwrap();

        let console = SharedBuffer::new();
        let config = LoggerConfig::new(blocker.join("logs"), "project");
        let logger = Logger::with_console(config, ConsoleWriter::new(console.clone()));

        let err = logger.init().unwrap_err();
        assert!(matches!(err, LoggerError::Io(_)));
        assert!(!logger.is_initialized());

        let out = console.contents();
        assert!(out.contains("Log error"));
        assert!(out.contains("Please init logger"));

        // a later init with a usable directory works
        logger.reconfigure(LoggerConfig::new(dir.path().join("logs"), "project")).unwrap();
        logger.init().unwrap();
        assert!(logger.is_initialized());
        logger.exit().unwrap();
    }

    #[test]
    fn test_invalid_config_fails_init() {
        let dir = tempdir().unwrap();
        let console = SharedBuffer::new();
        let config = LoggerConfig::new(dir.path().join("logs"), "");
        let logger = Logger::with_console(config, ConsoleWriter::new(console.clone()));

        assert!(matches!(logger.init(), Err(LoggerError::Config(_))));
        assert!(!logger.is_initialized());
        assert!(console.contents().contains("project_name"));
    }

    #[test]
    fn test_disabled_severity_still_reaches_file() {
        let dir = tempdir().unwrap();
        let (logger, console) = test_logger(dir.path());

        logger.init_with(Route::FileAndConsole, vec![Severity::Error]).unwrap();
        console.clear();
        log_info!(logger, "quiet info");
        log_error!(logger, "loud error");
        logger.exit().unwrap();

        let out = console.contents();
        assert!(!out.contains("quiet info"));
        assert!(out.contains("loud error"));
        let file = session_lines(dir.path()).join("\n");
        assert!(file.contains("quiet info"));
    }

    #[test]
    fn test_console_only_verbosity_keeps_file_empty() {
        let dir = tempdir().unwrap();
        let (logger, console) = test_logger(dir.path());

        logger.init_with(Route::ConsoleOnly, Severity::ALL).unwrap();
        log_info!(logger, "console verbosity");
        logger.exit().unwrap();

        assert!(session_lines(dir.path()).is_empty());
        assert!(console.contents().contains("console verbosity"));
    }

    #[test]
    fn test_file_only_verbosity_keeps_console_quiet() {
        let dir = tempdir().unwrap();
        let (logger, console) = test_logger(dir.path());
        let extra = SharedBuffer::new();
        logger.add_output_stream(extra.clone());

        logger.init_with(Route::FileOnly, Severity::ALL).unwrap();
        log_warning!(logger, "file verbosity");
        logger.exit().unwrap();

        assert_eq!(console.contents(), "");
        assert_eq!(extra.contents(), "");
        assert_eq!(session_lines(dir.path()).len(), 4);
    }

    #[test]
    fn test_reconfigure_rejected_during_session() {
        let dir = tempdir().unwrap();
        let (logger, _console) = test_logger(dir.path());
        logger.init().unwrap();

        let other = LoggerConfig::new(dir.path().join("other"), "other");
        assert!(matches!(logger.reconfigure(other), Err(LoggerError::AlreadyInitialized)));
        logger.exit().unwrap();

        let other = LoggerConfig::new(dir.path().join("other"), "other").with_verbosity(Route::FileOnly);
        logger.reconfigure(other).unwrap();
        assert_eq!(logger.verbosity(), Route::FileOnly);
        assert_eq!(logger.config().project_name, "other");
    }

    #[test]
    fn test_counter_resets_on_new_session() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        let (logger, _console) = test_logger(dir.path());

        logger.init().unwrap();
        log_info!(logger, "one");
        logger.exit().unwrap();
        assert_eq!(logger.counter(), 3);

        logger.init().unwrap();
        assert_eq!(logger.counter(), 1);
        logger.exit().unwrap();
    }

    #[test]
    fn test_concurrent_sequence_numbers_are_gapless() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 50;

        let dir = tempdir().unwrap();
        let (logger, _console) = test_logger(dir.path());
        let logger = Arc::new(logger);
        logger.init().unwrap();

        let barrier = Arc::new(Barrier::new(THREADS));
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let logger = Arc::clone(&logger);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..PER_THREAD {
                        log_debug!(logger, "thread", t, "line", i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        logger.exit().unwrap();

        let lines = session_lines(dir.path());
        assert_eq!(lines.len(), THREADS * PER_THREAD + 3);
        for (n, line) in lines.iter().enumerate() {
            let (seq, ..) = parse_file_line(line).expect("well-formed line");
            assert_eq!(seq, n as u64);
        }
    }

    #[test]
    fn test_two_threads_write_whole_lines() {
        let dir = tempdir().unwrap();
        let (logger, _console) = test_logger(dir.path());
        let logger = Arc::new(logger);
        logger.init().unwrap();

        let barrier = Arc::new(Barrier::new(2));
        let first = {
            let (logger, barrier) = (Arc::clone(&logger), Arc::clone(&barrier));
            thread::spawn(move || {
                barrier.wait();
                log_info!(logger, "test from first");
            })
        };
        let second = {
            let (logger, barrier) = (Arc::clone(&logger), Arc::clone(&barrier));
            thread::spawn(move || {
                barrier.wait();
                log_debug!(logger, "test from second");
            })
        };
        first.join().unwrap();
        second.join().unwrap();
        logger.exit().unwrap();

        let lines = session_lines(dir.path());
        assert_eq!(lines.len(), 5);
        let parsed: Vec<_> = lines.iter().map(|l| parse_file_line(l).expect("well-formed line")).collect();

        let info = parsed.iter().find(|p| p.3 == "test from first").expect("first message");
        let debug = parsed.iter().find(|p| p.3 == "test from second").expect("second message");
        assert_eq!(info.1, "INFO");
        assert_eq!(debug.1, "DEBUG");
        assert!(!info.2.contains("{{closure}}"));
    }
}
