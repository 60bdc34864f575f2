// src/exec/mod.rs

//! Process execution layer.
//!
//! This module decides how a target is launched and supervises the child
//! process until it has exited and all of its output has been logged.
//!
//! - [`executor`] owns the `Executor` entry point (target resolution and
//!   `execute`).
//! - [`strategy`] picks one of the three invocation strategies.
//! - [`pathext`] manages the host's runnable extension list and its scoped
//!   override.
//! - [`shebang`] parses `#!` lines.
//! - [`search_path`] looks targets up on `PATH`.
//! - [`supervisor`] spawns the child, drains its output and enforces the
//!   deadline.
//! - [`log`] is the sink everything above reports to.

pub mod executor;
pub mod log;
pub mod pathext;
pub mod search_path;
pub mod shebang;
pub mod strategy;
pub mod supervisor;

pub use executor::Executor;
pub use log::{ExecutionLog, TracingLog, PROCESS_LOG_LINE_PREFIX};
pub use pathext::{PathextOverride, RunnableExtensions};
pub use strategy::{CommandLine, Invocation};
pub use supervisor::{run_to_completion, RunOptions, SupervisedChild};
