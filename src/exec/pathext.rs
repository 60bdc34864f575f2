// src/exec/pathext.rs

//! The host's list of directly-runnable extensions (`PATHEXT`).
//!
//! `PATHEXT` is process-wide state. Every read and write this crate makes goes
//! through `PATHEXT_LOCK`. [`PathextOverride`] holds the lock while it is
//! alive and puts the previous value back when dropped, whichever way the
//! guarded block exits.

use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::types::normalize_extension;

/// Name of the environment variable holding the runnable extensions.
pub const PATHEXT_VAR: &str = "PATHEXT";

/// Value assumed on Windows when `PATHEXT` is unset.
pub const WINDOWS_DEFAULT_PATHEXT: &str = ".COM;.EXE;.BAT;.CMD;.VBS;.VBE;.JS;.JSE;.WSF;.WSH;.MSC";

/// List separator the host uses for `PATHEXT` (and `PATH`).
pub const LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

static PATHEXT_LOCK: Mutex<()> = Mutex::new(());

fn lock_pathext() -> MutexGuard<'static, ()> {
    // The guarded data is `()`, a panicking holder leaves nothing half-written.
    PATHEXT_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Extensions the host can launch directly, minus the configured exclusions.
///
/// Entries are normalized (lower-case, no leading `.`) and keep the host's
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnableExtensions {
    extensions: Vec<String>,
}

impl RunnableExtensions {
    /// Build from the current value of `PATHEXT` (or the platform default).
    ///
    /// Blocks while a [`PathextOverride`] is alive, so it always sees the
    /// host's own value.
    pub fn from_host(excluded: &[String]) -> Self {
        let _lock = lock_pathext();
        Self::from_host_value(env::var_os(PATHEXT_VAR).as_deref(), excluded)
    }

    fn from_host_value(value: Option<&OsStr>, excluded: &[String]) -> Self {
        match value.and_then(OsStr::to_str) {
            Some(v) => Self::from_list(v, excluded),
            None if cfg!(windows) => Self::from_list(WINDOWS_DEFAULT_PATHEXT, excluded),
            None => Self::from_list("", excluded),
        }
    }

    /// Build from a `PATHEXT`-style list using the host separator.
    pub fn from_list(value: &str, excluded: &[String]) -> Self {
        Self::from_tokens(value.split(LIST_SEPARATOR), excluded)
    }

    pub fn from_tokens<I, S>(tokens: I, excluded: &[String]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluded: Vec<String> = excluded.iter().map(|e| normalize_extension(e)).collect();

        let mut extensions: Vec<String> = Vec::new();
        for token in tokens {
            let ext = normalize_extension(token.as_ref());
            if ext.is_empty() || excluded.contains(&ext) || extensions.contains(&ext) {
                continue;
            }
            extensions.push(ext);
        }

        Self { extensions }
    }

    pub fn contains(&self, extension: &str) -> bool {
        !extension.is_empty() && self.extensions.iter().any(|e| e == extension)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Render as a `PATHEXT` value, e.g. `.exe;.bat` on Windows.
    pub fn to_env_value(&self) -> String {
        let sep = LIST_SEPARATOR.to_string();
        self.extensions
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(sep.as_str())
    }
}

/// Scoped override of `PATHEXT`.
///
/// Holds a process-wide lock so that overrides from several executors never
/// interleave. Keep it alive only for synchronous work (resolving and
/// spawning); a spawned child keeps its own copy of the environment.
pub struct PathextOverride {
    previous: Option<OsString>,
    runnable: RunnableExtensions,
    _lock: MutexGuard<'static, ()>,
}

impl PathextOverride {
    /// Take ownership of `PATHEXT`, read the host's list and replace it with
    /// that list minus `excluded`.
    pub fn apply(excluded: &[String]) -> Self {
        let lock = lock_pathext();
        let previous = env::var_os(PATHEXT_VAR);
        let runnable = RunnableExtensions::from_host_value(previous.as_deref(), excluded);

        // SAFETY: every write to PATHEXT made by this crate happens while
        // PATHEXT_LOCK is held.
        unsafe { env::set_var(PATHEXT_VAR, runnable.to_env_value()) };

        Self {
            previous,
            runnable,
            _lock: lock,
        }
    }

    /// The filtered list now held by `PATHEXT`.
    pub fn runnable(&self) -> &RunnableExtensions {
        &self.runnable
    }
}

impl Drop for PathextOverride {
    fn drop(&mut self) {
        // The lock field is released after this body runs.
        // SAFETY: see `apply`.
        unsafe {
            match self.previous.take() {
                Some(value) => env::set_var(PATHEXT_VAR, value),
                None => env::remove_var(PATHEXT_VAR),
            }
        }
    }
}
