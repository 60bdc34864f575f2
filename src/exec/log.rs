// src/exec/log.rs

//! Log sink the executor reports to.
//!
//! The executor never configures logging itself; it only hands finished
//! lines to an [`ExecutionLog`]. Production code uses [`TracingLog`], tests
//! can record lines instead.

/// Prefix put in front of every line forwarded from the child's output.
pub const PROCESS_LOG_LINE_PREFIX: &str = ">> ";

/// Leveled text sink shared between the executor and its draining task.
pub trait ExecutionLog: Send + Sync {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Forwards to the global `tracing` subscriber under the
/// `autorun::executor` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ExecutionLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!(target: "autorun::executor", "{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "autorun::executor", "{message}");
    }
}
