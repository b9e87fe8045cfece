//! Logger configuration
//!
//! `LoggerConfig` can be built in code, loaded from a YAML/JSON file, or
//! resolved from the environment with `LoggerConfig::from_env`.

mod file;

pub use file::{
    LoggerConfig, Formats,
    ENV_CONFIG, ENV_DIR, ENV_PROJECT, ENV_VERBOSITY, ENV_SEVERITIES,
};
