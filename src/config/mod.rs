// src/config/mod.rs

//! Configuration loading and validation for autorun.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk or from text (`loader.rs`).
//! - Validate it once into immutable settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    default_config_path, load_and_validate, load_from_path, parse_config, DEFAULT_CONFIG_FILE,
};
pub use model::{
    ConfigFile, ExecutorSection, ExecutorSettings, InterpreterRule, InterpreterSection,
    LogSettings, RawConfigFile, DEFAULT_MAX_RUNTIME,
};
