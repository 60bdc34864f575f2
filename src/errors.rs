// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutorunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The target is neither a file nor resolvable through `PATH`.
    #[error("{} does not exist (and is not in PATH)", .0.display())]
    TargetNotFound(PathBuf),

    /// None of the invocation strategies applies to the target.
    #[error("cannot determine how to invoke {}: {reason}", .target.display())]
    InvocationResolution { target: PathBuf, reason: String },

    #[error("failed to spawn '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, AutorunError>;
