//! Logger configuration and its file/env sources
//!
//! Supports YAML or JSON files and a handful of `ROUTELOG_*` environment
//! overrides. The user-level file lives at `~/.config/routelog/config.yaml`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoggerError, LoggerResult};
use crate::format::{Template, CONSOLE_FORMAT, EXTRA_FORMAT, FILE_FORMAT};
use crate::types::{parse_severity_list, Route, Severity};

/// Path of an explicit config file
pub const ENV_CONFIG: &str = "ROUTELOG_CONFIG";
/// Log directory override
pub const ENV_DIR: &str = "ROUTELOG_DIR";
/// Project name override (file name prefix)
pub const ENV_PROJECT: &str = "ROUTELOG_PROJECT";
/// Verbosity override: `file_only`, `console_only` or `file_and_console`
pub const ENV_VERBOSITY: &str = "ROUTELOG_VERBOSITY";
/// Comma-separated list of severities shown on the console
pub const ENV_SEVERITIES: &str = "ROUTELOG_SEVERITIES";

/// Line templates for the three outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formats {
    #[serde(default = "default_console_format")]
    pub console: Template,
    #[serde(default = "default_file_format")]
    pub file: Template,
    #[serde(default = "default_extra_format")]
    pub extra: Template,
}

fn default_console_format() -> Template {
    Template::parse(CONSOLE_FORMAT)
}

fn default_file_format() -> Template {
    Template::parse(FILE_FORMAT)
}

fn default_extra_format() -> Template {
    Template::parse(EXTRA_FORMAT)
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            console: default_console_format(),
            file: default_file_format(),
            extra: default_extra_format(),
        }
    }
}

/// Logger configuration
///
/// # Example
///
/// ```
/// use routelog_core::config::LoggerConfig;
/// use routelog_core::Route;
///
/// let config = LoggerConfig::new("/tmp/my-logs", "billing")
///     .with_verbosity(Route::FileOnly);
/// assert_eq!(config.project_name, "billing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Directory holding session files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Prefix of session file names
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Default verbosity used by `Logger::init`
    #[serde(default)]
    pub verbosity: Route,

    /// Default severities shown on the console
    #[serde(default = "default_severities")]
    pub severities: Vec<Severity>,

    #[serde(default)]
    pub formats: Formats,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_project_name() -> String {
    "project".to_string()
}

fn default_severities() -> Vec<Severity> {
    Severity::ALL.to_vec()
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            project_name: default_project_name(),
            verbosity: Route::default(),
            severities: default_severities(),
            formats: Formats::default(),
        }
    }
}

impl LoggerConfig {
    /// Create a config for a directory and project name, other fields default
    pub fn new(log_dir: impl Into<PathBuf>, project_name: impl Into<String>) -> Self {
        Self {
            log_dir: log_dir.into(),
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Set the default verbosity
    pub fn with_verbosity(mut self, verbosity: Route) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the default console severities
    pub fn with_severities(mut self, severities: impl Into<Vec<Severity>>) -> Self {
        self.severities = severities.into();
        self
    }

    /// Replace the line templates
    pub fn with_formats(mut self, formats: Formats) -> Self {
        self.formats = formats;
        self
    }

    /// File name of a session started at `stamp` (`YYYY-MM-DD@HH-mm-ss`)
    pub fn session_file_name(&self, stamp: &str) -> String {
        format!("{}_log_{}.log", self.project_name, stamp)
    }

    /// User-level config path (~/.config/routelog/config.yaml)
    pub fn user_config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("routelog").join("config.yaml")
    }

    /// Load a config file; `.json` files are parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> LoggerResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        if is_json(path) {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Save the config, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> LoggerResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the process config.
    ///
    /// Base: the file named by `ROUTELOG_CONFIG`, else the user config file if
    /// it exists, else defaults. `ROUTELOG_*` variables then override single
    /// fields; values that fail to parse are ignored.
    pub fn from_env() -> LoggerResult<Self> {
        let mut config = match env::var(ENV_CONFIG) {
            Ok(path) if !path.is_empty() => Self::load(path)?,
            _ => {
                let user = Self::user_config_path();
                if user.exists() {
                    Self::load(user)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Apply `ROUTELOG_*` style overrides from a lookup function
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_DIR).filter(|v| !v.is_empty()) {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(project) = lookup(ENV_PROJECT).filter(|v| !v.is_empty()) {
            self.project_name = project;
        }
        if let Some(verbosity) = lookup(ENV_VERBOSITY).and_then(|v| v.parse().ok()) {
            self.verbosity = verbosity;
        }
        if let Some(severities) = lookup(ENV_SEVERITIES).and_then(|v| parse_severity_list(&v).ok()) {
            self.severities = severities;
        }
    }

    /// Reject configs that cannot produce a usable session file name
    pub fn validate(&self) -> LoggerResult<()> {
        if self.project_name.is_empty() {
            return Err(LoggerError::config("project_name must not be empty"));
        }
        if self.project_name.contains(['/', '\\']) {
            return Err(LoggerError::config(format!(
                "project_name must not contain path separators: {:?}",
                self.project_name
            )));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
