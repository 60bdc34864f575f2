use std::str::FromStr;
use serde::Deserialize;

/// Log level as written in the `[executor]` config section.
///
/// Accepts the usual names case-insensitively; `"warning"` is an alias for
/// `warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ConfigLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for ConfigLogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(ConfigLogLevel::Error),
            "warn" | "warning" => Ok(ConfigLogLevel::Warn),
            "info" => Ok(ConfigLogLevel::Info),
            "debug" => Ok(ConfigLogLevel::Debug),
            "trace" => Ok(ConfigLogLevel::Trace),
            other => Err(format!(
                "invalid log_level: {other} (expected error, warn, info, debug or trace)"
            )),
        }
    }
}

impl TryFrom<String> for ConfigLogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

/// Output layout of the log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `tracing-subscriber`'s default single-line format.
    Full,
    Compact,
    /// Multi-line, human oriented.
    Pretty,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Full
    }
}

/// Lower-case an extension token and strip surrounding whitespace and any
/// leading `.` separators, so `".PY"`, `"py"` and `" .py "` all compare equal.
pub fn normalize_extension(token: &str) -> String {
    token.trim().trim_start_matches('.').to_lowercase()
}
