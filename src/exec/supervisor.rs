// src/exec/supervisor.rs

//! Child process supervision: spawn, drain output, enforce the deadline,
//! reap.
//!
//! While the child runs two activities progress side by side:
//!
//! - a blocking draining task that forwards every line of the merged
//!   stdout/stderr pipe to the [`ExecutionLog`] until the pipe closes;
//! - a polling loop that checks for exit every [`DEFAULT_POLL_INTERVAL`] and
//!   kills the child once its deadline has passed.
//!
//! [`run_to_completion`] only returns after both have finished, so every
//! output line is logged before the exit code line. [`SupervisedChild`]
//! splits the same run into a synchronous spawn and an async wait.

use std::io::{self, BufRead, BufReader, PipeReader};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use anyhow::anyhow;
use chrono::{DateTime, Local};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::errors::{AutorunError, Result};
use crate::exec::log::{ExecutionLog, PROCESS_LOG_LINE_PREFIX};
use crate::exec::strategy::CommandLine;

/// How often the child's liveness and deadline are re-checked.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Exit code reported when the host gives neither a code nor a signal.
pub const UNKNOWN_EXIT_CODE: i32 = -1;

/// Knobs for a single supervised run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub max_runtime: Duration,
    /// Working directory of the child; inherits ours when `None`.
    pub working_dir: Option<PathBuf>,
    pub poll_interval: Duration,
}

impl RunOptions {
    pub fn new(max_runtime: Duration) -> Self {
        Self {
            max_runtime,
            working_dir: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Run `command` to completion and return its exit code.
///
/// Spawn failures are returned as [`AutorunError::SpawnError`]. Hitting the
/// deadline is not an error: the child is killed and whatever code the host
/// reports for it is returned.
pub async fn run_to_completion(
    command: &CommandLine,
    options: &RunOptions,
    log: Arc<dyn ExecutionLog>,
) -> Result<i32> {
    SupervisedChild::spawn(command, options, log)?.wait().await
}

/// A spawned child whose output is being drained.
///
/// Created by [`SupervisedChild::spawn`]; [`SupervisedChild::wait`] enforces
/// the deadline and returns the exit code. On Unix the child leads its own
/// process group, and the deadline kill takes the whole group down, so
/// grandchildren still holding the output pipe cannot outlive it.
pub struct SupervisedChild {
    child: Child,
    #[cfg_attr(not(unix), allow(dead_code))]
    pid: Option<u32>,
    drain: JoinHandle<io::Result<()>>,
    /// `None` when the runtime is too large to represent: never expires.
    deadline: Option<Instant>,
    poll_interval: Duration,
    log: Arc<dyn ExecutionLog>,
}

impl SupervisedChild {
    /// Log the run header, spawn the child and start draining its output.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        command: &CommandLine,
        options: &RunOptions,
        log: Arc<dyn ExecutionLog>,
    ) -> Result<Self> {
        log.info(&format!("Executing: {command}..."));

        let spawned_at = Instant::now();
        log.debug(&format!(
            ".. With a max runtime of: {} seconds.",
            options.max_runtime.as_secs()
        ));
        log.debug(&format!(
            ".. Process death time is: {}",
            wall_clock_deadline(options.max_runtime)
        ));

        let (reader, writer) = io::pipe()?;
        let err_writer = writer.try_clone()?;

        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(err_writer))
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);
        if let Some(dir) = &options.working_dir {
            cmd.current_dir(dir);
        }

        let spawn_result = cmd.spawn();
        // `cmd` still owns our copies of the pipe's write end; the reader only
        // sees EOF once they are gone.
        drop(cmd);
        let child = spawn_result.map_err(|source| AutorunError::SpawnError {
            program: command.program().to_string_lossy().into_owned(),
            source,
        })?;

        let pid = child.id();
        match pid {
            Some(pid) => log.debug(&format!("Process pid: {pid}")),
            None => log.debug("Process pid: unknown (already exited)"),
        }

        let drain_log = Arc::clone(&log);
        let drain = tokio::task::spawn_blocking(move || drain_lines(reader, drain_log.as_ref()));

        Ok(Self {
            child,
            pid,
            drain,
            deadline: spawned_at.checked_add(options.max_runtime),
            poll_interval: options.poll_interval,
            log,
        })
    }

    /// Wait until the child has exited and its output pipe has closed,
    /// killing it once the deadline passes.
    pub async fn wait(mut self) -> Result<i32> {
        let log = Arc::clone(&self.log);
        let mut status = None;
        let mut kill_requested = false;

        loop {
            if status.is_none() {
                status = self.child.try_wait()?;
            }
            if status.is_some() && self.drain.is_finished() {
                break;
            }

            let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
            if expired && !kill_requested {
                log.info("Killing process as death time has elapsed.");
                self.kill();
                kill_requested = true;
            }

            sleep(self.poll_interval).await;
        }

        match (&mut self.drain).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log.debug(&format!("Reading process output failed: {e}")),
            Err(join_err) => {
                return Err(AutorunError::Other(anyhow!(
                    "output draining task failed: {join_err}"
                )));
            }
        }

        let exit_code = status.map_or(UNKNOWN_EXIT_CODE, exit_code_of);
        log.info(&format!(".. Exit Code: {exit_code}"));
        Ok(exit_code)
    }

    fn kill(&mut self) {
        #[cfg(unix)]
        {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            if let Some(pgid) = self.pid.and_then(|p| i32::try_from(p).ok()) {
                match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
                    Ok(()) => return,
                    Err(e) => self.log.debug(&format!("Killing process group failed: {e}")),
                }
            }
        }

        if let Err(e) = self.child.start_kill() {
            self.log.debug(&format!("Kill request failed: {e}"));
        }
    }
}

/// Forward each line of `reader` to `log` until EOF.
///
/// Blank lines are forwarded too.
fn drain_lines(reader: PipeReader, log: &dyn ExecutionLog) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }

        let mut line: &[u8] = &buf;
        if let Some(stripped) = line.strip_suffix(b"\n") {
            line = stripped;
        }
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }

        log.info(&format!(
            "{PROCESS_LOG_LINE_PREFIX}{}",
            String::from_utf8_lossy(line)
        ));
    }
}

/// Exit code of a finished child.
///
/// On Unix a signal-terminated child reports the negated signal number.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    UNKNOWN_EXIT_CODE
}

fn wall_clock_deadline(max_runtime: Duration) -> String {
    match SystemTime::now().checked_add(max_runtime) {
        Some(t) => DateTime::<Local>::from(t)
            .format("%Y-%m-%d %H:%M:%S%.6f")
            .to_string(),
        None => "never".to_string(),
    }
}
