use std::sync::{Arc, Mutex};

use autorun::exec::{ExecutionLog, TracingLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
}

/// An `ExecutionLog` that:
/// - records every line with its level, in arrival order
/// - also forwards to `tracing` so failing tests show the run.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, any level.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn info_lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == LogLevel::Info)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Recorded lines that came from the child's output, prefix included.
    pub fn output_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.starts_with(autorun::exec::PROCESS_LOG_LINE_PREFIX))
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

impl ExecutionLog for RecordingLog {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
        TracingLog.info(message);
    }

    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
        TracingLog.debug(message);
    }
}
