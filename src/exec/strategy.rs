// src/exec/strategy.rs

//! Invocation strategy resolution.
//!
//! A target is run in exactly one of three ways, tried in this order:
//!
//! 1. [`Invocation::Direct`]: its extension is in the runnable set, so the
//!    host launches it as-is.
//! 2. [`Invocation::Interpreter`]: its extension belongs to the pinned
//!    interpreter rule.
//! 3. [`Invocation::Shebang`]: its first line names an interpreter.
//!
//! If none applies the target cannot be invoked.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::InterpreterRule;
use crate::errors::{AutorunError, Result};
use crate::exec::pathext::RunnableExtensions;
use crate::exec::shebang::read_shebang;
use crate::fs::FileSystem;

/// Program followed by its arguments. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    parts: Vec<OsString>,
}

impl CommandLine {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            parts: vec![program.into()],
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.parts.push(arg.into());
        self
    }

    pub fn program(&self) -> &OsString {
        &self.parts[0]
    }

    pub fn args(&self) -> &[OsString] {
        &self.parts[1..]
    }

    pub fn as_slice(&self) -> &[OsString] {
        &self.parts
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self
            .parts
            .iter()
            .map(|p| format!("{:?}", p.to_string_lossy()))
            .collect();
        write!(f, "[{}]", quoted.join(", "))
    }
}

/// The chosen way of launching a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Direct,
    Interpreter { program: PathBuf },
    Shebang { tokens: Vec<String> },
}

impl Invocation {
    /// Pick the first strategy that applies to `target`.
    pub fn resolve(
        target: &Path,
        runnable: &RunnableExtensions,
        interpreter: Option<&InterpreterRule>,
        fs: &dyn FileSystem,
    ) -> Result<Self> {
        let extension = extension_of(target);

        if runnable.contains(&extension) {
            return Ok(Invocation::Direct);
        }

        if let Some(rule) = interpreter.filter(|r| !extension.is_empty() && r.handles(&extension)) {
            return Ok(Invocation::Interpreter {
                program: rule.program.clone(),
            });
        }

        let resolution_error = |reason: String| AutorunError::InvocationResolution {
            target: target.to_path_buf(),
            reason,
        };

        let reader = fs
            .open_read(target)
            .map_err(|e| resolution_error(format!("{e:#}")))?;
        let tokens = read_shebang(reader).map_err(|e| {
            let ext = if extension.is_empty() {
                "no extension".to_string()
            } else {
                format!("extension '{extension}' is not runnable")
            };
            resolution_error(format!("{ext} and {e}"))
        })?;

        Ok(Invocation::Shebang { tokens })
    }

    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Invocation::Direct => "PATHEXT",
            Invocation::Interpreter { .. } => "Interpreter",
            Invocation::Shebang { .. } => "Shebang",
        }
    }

    /// Concrete command for running `target` with this strategy.
    pub fn command_for(&self, target: &Path) -> CommandLine {
        match self {
            Invocation::Direct => CommandLine::new(target),
            Invocation::Interpreter { program } => CommandLine::new(program).arg(target),
            Invocation::Shebang { tokens } => {
                let mut parts: Vec<OsString> = tokens.iter().map(OsString::from).collect();
                parts.push(target.as_os_str().to_os_string());
                CommandLine { parts }
            }
        }
    }
}

/// Lower-cased extension without the leading `.`; empty if there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
