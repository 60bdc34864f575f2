// src/exec/executor.rs

//! The executor: one target, resolved once, runnable many times.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ExecutorSettings;
use crate::errors::{AutorunError, Result};
use crate::exec::log::{ExecutionLog, TracingLog};
use crate::exec::pathext::{PathextOverride, RunnableExtensions};
use crate::exec::search_path::find_on_search_path;
use crate::exec::strategy::{CommandLine, Invocation};
use crate::exec::supervisor::{RunOptions, SupervisedChild};
use crate::fs::{FileSystem, RealFileSystem};

/// Runs a single target according to [`ExecutorSettings`].
///
/// The target is resolved at construction: an existing file is used as
/// given, anything else is looked up on `PATH`. `execute` takes `&mut self`,
/// so one executor never has two children alive at once.
pub struct Executor {
    settings: ExecutorSettings,
    target: PathBuf,
    log: Arc<dyn ExecutionLog>,
    fs: Arc<dyn FileSystem>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("settings", &self.settings)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Executor {
    /// Create an executor that logs through `tracing` and uses the real
    /// filesystem.
    pub fn new(settings: ExecutorSettings, target: impl AsRef<Path>) -> Result<Self> {
        Self::with_parts(
            settings,
            target,
            Arc::new(TracingLog),
            Arc::new(RealFileSystem),
        )
    }

    /// Like [`Executor::new`] with an explicit log sink.
    pub fn with_log(
        settings: ExecutorSettings,
        target: impl AsRef<Path>,
        log: Arc<dyn ExecutionLog>,
    ) -> Result<Self> {
        Self::with_parts(settings, target, log, Arc::new(RealFileSystem))
    }

    pub fn with_parts(
        settings: ExecutorSettings,
        target: impl AsRef<Path>,
        log: Arc<dyn ExecutionLog>,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        let target = target.as_ref();

        let target = if fs.is_file(target) {
            target.to_path_buf()
        } else {
            let runnable = RunnableExtensions::from_host(&settings.excluded_extensions);
            let search_path = env::var_os("PATH");
            find_on_search_path(target, search_path.as_deref(), &runnable, fs.as_ref())
                .ok_or_else(|| AutorunError::TargetNotFound(target.to_path_buf()))?
        };

        Ok(Self {
            settings,
            target,
            log,
            fs,
        })
    }

    /// The resolved target path.
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    /// Decide how the target would be run with the host's current `PATHEXT`.
    ///
    /// Does not touch the environment and spawns nothing.
    pub fn command(&self) -> Result<CommandLine> {
        let runnable = RunnableExtensions::from_host(&self.settings.excluded_extensions);
        self.command_with(&runnable)
    }

    /// Decide how the target would be run given an explicit runnable set.
    pub fn command_with(&self, runnable: &RunnableExtensions) -> Result<CommandLine> {
        let invocation = Invocation::resolve(
            &self.target,
            runnable,
            self.settings.interpreter.as_ref(),
            self.fs.as_ref(),
        )?;
        self.log.debug(&format!(
            "About to do a {}-based execution",
            invocation.kind()
        ));
        Ok(invocation.command_for(&self.target))
    }

    /// Run the target once and return its exit code.
    ///
    /// `PATHEXT` holds the filtered runnable list while the command is
    /// resolved and spawned, so the child inherits it. The host's value is
    /// back in place before the child is waited on, and on every error path.
    pub async fn execute(&mut self) -> Result<i32> {
        let child = {
            let pathext = PathextOverride::apply(&self.settings.excluded_extensions);
            let command = self.command_with(pathext.runnable())?;
            let options = self.run_options()?;
            SupervisedChild::spawn(&command, &options, Arc::clone(&self.log))?
        };

        child.wait().await
    }

    /// Build run options, creating the execution directory if needed.
    fn run_options(&self) -> Result<RunOptions> {
        let mut options = RunOptions::new(self.settings.max_runtime);
        if let Some(dir) = &self.settings.execution_directory {
            self.fs.create_dir_all(dir)?;
            options = options.with_working_dir(dir);
        }
        Ok(options)
    }
}
