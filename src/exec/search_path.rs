// src/exec/search_path.rs

//! Locating a target on the executable search path (`PATH`).

use std::env;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::exec::pathext::RunnableExtensions;
use crate::fs::FileSystem;

/// Find `name` the way a shell would.
///
/// - A name with a directory component (`./tool`, `bin/tool`) is only checked
///   at that location.
/// - A bare name is tried in every directory of `search_path`, in order.
/// - On Windows each runnable extension is also tried as a suffix.
///
/// Matches must be executable files. The result is canonicalized.
pub fn find_on_search_path(
    name: &Path,
    search_path: Option<&OsStr>,
    runnable: &RunnableExtensions,
    fs: &dyn FileSystem,
) -> Option<PathBuf> {
    if has_directory_component(name) {
        return first_executable(name, runnable, fs);
    }

    let search_path = search_path?;
    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .find_map(|dir| first_executable(&dir.join(name), runnable, fs))
}

fn first_executable(
    candidate: &Path,
    runnable: &RunnableExtensions,
    fs: &dyn FileSystem,
) -> Option<PathBuf> {
    let found = if fs.is_executable(candidate) {
        Some(candidate.to_path_buf())
    } else if cfg!(windows) {
        runnable.iter().find_map(|ext| {
            let mut with_ext = candidate.as_os_str().to_os_string();
            with_ext.push(".");
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            fs.is_executable(&with_ext).then_some(with_ext)
        })
    } else {
        None
    }?;

    Some(fs.canonicalize(&found).unwrap_or(found))
}

fn has_directory_component(name: &Path) -> bool {
    name.components().count() > 1
        || name
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
}
