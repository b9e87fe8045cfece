//! Logger error types

use thiserror::Error;

/// Errors that can occur during logger operations
///
/// The logger never propagates these out of a log call; they are reported as
/// console-only error lines. `init`, `exit` and the configuration helpers also
/// return them so hosts can react (for example by retrying `init`).
#[derive(Error, Debug)]
pub enum LoggerError {
    /// Directory creation, file open or write failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The logger already has an open session
    #[error("Log already init")]
    AlreadyInitialized,

    /// The logger has no open session
    #[error("Please init logger")]
    NotInitialized,

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an error for an unknown enum value in config or env
    pub fn unknown_value(kind: &str, value: &str) -> Self {
        Self::Config(format!("unknown {}: {:?}", kind, value))
    }
}

pub type LoggerResult<T> = Result<T, LoggerError>;
