// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::{ConfigLogLevel, LogFormat};

/// Runtime budget used when `max_process_runtime_seconds` is not set.
///
/// One (Gregorian) year, i.e. effectively unbounded.
pub const DEFAULT_MAX_RUNTIME: Duration = Duration::from_secs(31_556_952);

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [executor]
/// execution_directory = "/tmp/autorun"
/// extensions_to_remove_from_pathext = ["py", "pyw", "pyc"]
/// max_process_runtime_seconds = 300
///
/// [executor.interpreter]
/// path = "/usr/bin/python3"
/// ```
///
/// Sections other than `[executor]` are ignored. Use
/// [`ConfigFile::try_from`] (or [`crate::config::load_and_validate`]) to get
/// validated settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub executor: ExecutorSection,
}

/// `[executor]` section, exactly as written.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutorSection {
    /// When `false` the runner skips execution entirely.
    #[serde(default = "default_enable")]
    pub enable: bool,

    /// Working directory for the child; created on demand. `""` means unset.
    #[serde(default)]
    pub execution_directory: Option<String>,

    /// Extension tokens removed from the host's directly-runnable list.
    #[serde(default)]
    pub extensions_to_remove_from_pathext: Vec<String>,

    #[serde(default)]
    pub max_process_runtime_seconds: Option<u64>,

    #[serde(default)]
    pub interpreter: Option<InterpreterSection>,

    /// Directory for `log.txt`. Logs go to stderr when unset.
    #[serde(default)]
    pub log_directory: Option<String>,

    #[serde(default)]
    pub log_level: Option<ConfigLogLevel>,

    #[serde(default)]
    pub log_format: Option<LogFormat>,
}

fn default_enable() -> bool {
    true
}

impl Default for ExecutorSection {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            execution_directory: None,
            extensions_to_remove_from_pathext: Vec::new(),
            max_process_runtime_seconds: None,
            interpreter: None,
            log_directory: None,
            log_level: None,
            log_format: None,
        }
    }
}

/// `[executor.interpreter]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InterpreterSection {
    /// Absolute path of the interpreter binary.
    pub path: String,

    #[serde(default = "default_interpreter_extensions")]
    pub extensions: Vec<String>,
}

fn default_interpreter_extensions() -> Vec<String> {
    vec!["py".to_string(), "pyc".to_string()]
}

/// Validated configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub executor: ExecutorSettings,
    pub logging: LogSettings,
}

/// Per-execution settings consumed (read-only) by the executor.
#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub enable: bool,
    pub max_runtime: Duration,
    pub execution_directory: Option<PathBuf>,
    /// Normalized extension tokens (lower-case, no leading `.`).
    pub excluded_extensions: Vec<String>,
    pub interpreter: Option<InterpreterRule>,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            enable: true,
            max_runtime: DEFAULT_MAX_RUNTIME,
            execution_directory: None,
            excluded_extensions: Vec::new(),
            interpreter: None,
        }
    }
}

/// A pinned interpreter and the extension tokens it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterRule {
    pub program: PathBuf,
    pub extensions: Vec<String>,
}

impl InterpreterRule {
    pub fn handles(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    pub directory: Option<PathBuf>,
    pub level: Option<ConfigLogLevel>,
    pub format: LogFormat,
}
