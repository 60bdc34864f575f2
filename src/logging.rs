// src/logging.rs

//! Logging setup for `autorun` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `AUTORUN_LOG` environment variable (e.g. "info", "debug")
//! 3. `[executor].log_level` from the config file
//! 4. default to `info`
//!
//! Logs go to STDERR, or to `<log_directory>/log.txt` when configured.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::cli::LogLevel;
use crate::config::LogSettings;
use crate::types::{ConfigLogLevel, LogFormat};

/// Name of the log file created inside `log_directory`.
pub const LOG_FILE_NAME: &str = "log.txt";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, settings: &LogSettings) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var("AUTORUN_LOG")
            .ok()
            .and_then(|s| s.parse::<ConfigLogLevel>().ok())
            .or(settings.level)
            .map(level_from_config)
            .unwrap_or(tracing::Level::INFO),
    };

    let (writer, ansi) = match &settings.directory {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating log dir {:?}", dir))?;
            let path = dir.join(LOG_FILE_NAME);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {:?}", path))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let builder = fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(ansi)
        .with_writer(writer);

    let installed = match settings.format {
        LogFormat::Full => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    installed.map_err(|e| anyhow!("installing log subscriber: {e}"))
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn level_from_config(lvl: ConfigLogLevel) -> tracing::Level {
    match lvl {
        ConfigLogLevel::Error => tracing::Level::ERROR,
        ConfigLogLevel::Warn => tracing::Level::WARN,
        ConfigLogLevel::Info => tracing::Level::INFO,
        ConfigLogLevel::Debug => tracing::Level::DEBUG,
        ConfigLogLevel::Trace => tracing::Level::TRACE,
    }
}
