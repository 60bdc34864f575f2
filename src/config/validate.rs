// src/config/validate.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::config::model::{
    ConfigFile, DEFAULT_MAX_RUNTIME, ExecutorSection, ExecutorSettings, InterpreterRule,
    InterpreterSection, LogSettings, RawConfigFile,
};
use crate::errors::{AutorunError, Result};
use crate::types::normalize_extension;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::AutorunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let executor = validate_executor(&raw.executor)?;
        let logging = log_settings(&raw.executor);
        Ok(ConfigFile { executor, logging })
    }
}

fn validate_executor(section: &ExecutorSection) -> Result<ExecutorSettings> {
    let excluded_extensions = normalize_extensions(
        "[executor].extensions_to_remove_from_pathext",
        &section.extensions_to_remove_from_pathext,
    )?;

    let interpreter = section
        .interpreter
        .as_ref()
        .map(validate_interpreter)
        .transpose()?;

    let max_runtime = section
        .max_process_runtime_seconds
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_MAX_RUNTIME);

    Ok(ExecutorSettings {
        enable: section.enable,
        max_runtime,
        execution_directory: non_empty_path(section.execution_directory.as_deref()),
        excluded_extensions,
        interpreter,
    })
}

fn validate_interpreter(section: &InterpreterSection) -> Result<InterpreterRule> {
    let program = PathBuf::from(section.path.trim());

    // Relative paths would be looked up on PATH at spawn time, which is
    // exactly what pinning an interpreter is meant to avoid.
    if !program.is_absolute() {
        return Err(AutorunError::ConfigError(format!(
            "[executor.interpreter].path must be an absolute path (got {:?})",
            section.path
        )));
    }

    let extensions =
        normalize_extensions("[executor.interpreter].extensions", &section.extensions)?;
    if extensions.is_empty() {
        return Err(AutorunError::ConfigError(
            "[executor.interpreter].extensions must list at least one extension".to_string(),
        ));
    }

    Ok(InterpreterRule {
        program,
        extensions,
    })
}

fn normalize_extensions(field: &str, tokens: &[String]) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let ext = normalize_extension(token);
        if ext.is_empty() {
            return Err(AutorunError::ConfigError(format!(
                "{field} contains an empty extension ({token:?})"
            )));
        }
        if !out.contains(&ext) {
            out.push(ext);
        }
    }
    Ok(out)
}

fn log_settings(section: &ExecutorSection) -> LogSettings {
    LogSettings {
        directory: non_empty_path(section.log_directory.as_deref()),
        level: section.log_level,
        format: section.log_format.unwrap_or_default(),
    }
}

fn non_empty_path(value: Option<&str>) -> Option<PathBuf> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
