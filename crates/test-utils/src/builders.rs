#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use autorun::config::{ExecutorSettings, InterpreterRule};

/// Builder for `ExecutorSettings` to simplify test setup.
pub struct SettingsBuilder {
    settings: ExecutorSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: ExecutorSettings::default(),
        }
    }

    pub fn max_runtime(mut self, max_runtime: Duration) -> Self {
        self.settings.max_runtime = max_runtime;
        self
    }

    pub fn execution_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings.execution_directory = Some(dir.into());
        self
    }

    /// Exclude an extension token; stored normalized, as validation would.
    pub fn exclude(mut self, ext: &str) -> Self {
        self.settings
            .excluded_extensions
            .push(autorun::types::normalize_extension(ext));
        self
    }

    pub fn interpreter(mut self, program: impl Into<PathBuf>, extensions: &[&str]) -> Self {
        self.settings.interpreter = Some(InterpreterRule {
            program: program.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        });
        self
    }

    pub fn build(self) -> ExecutorSettings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
