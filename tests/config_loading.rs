use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::NamedTempFile;
use autorun::config::{
    default_config_path, load_and_validate, load_from_path, parse_config, DEFAULT_MAX_RUNTIME,
};
use autorun::errors::AutorunError;
use autorun::types::{ConfigLogLevel, LogFormat};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn empty_file_yields_defaults() {
    let file = config_file("");

    let cfg = load_and_validate(file.path()).unwrap();

    assert!(cfg.executor.enable);
    assert_eq!(cfg.executor.max_runtime, DEFAULT_MAX_RUNTIME);
    assert_eq!(cfg.executor.max_runtime, Duration::from_secs(31_556_952));
    assert!(cfg.executor.execution_directory.is_none());
    assert!(cfg.executor.excluded_extensions.is_empty());
    assert!(cfg.executor.interpreter.is_none());
    assert!(cfg.logging.directory.is_none());
    assert_eq!(cfg.logging.format, LogFormat::Full);
}

#[test]
fn full_executor_section_is_validated() {
    let file = config_file(
        r#"
[watcher]
poll_seconds = 1

[executor]
enable = false
execution_directory = "/tmp/autorun-work"
extensions_to_remove_from_pathext = [".PY", "pyw", " pyc ", "py"]
max_process_runtime_seconds = 5
log_directory = "logs"
log_level = "Warning"
log_format = "compact"

[executor.interpreter]
path = "/usr/bin/python3"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let exec = &cfg.executor;

    assert!(!exec.enable);
    assert_eq!(exec.max_runtime, Duration::from_secs(5));
    assert_eq!(
        exec.execution_directory,
        Some(PathBuf::from("/tmp/autorun-work"))
    );
    assert_eq!(exec.excluded_extensions, vec!["py", "pyw", "pyc"]);

    let rule = exec.interpreter.as_ref().unwrap();
    assert_eq!(rule.program, PathBuf::from("/usr/bin/python3"));
    assert_eq!(rule.extensions, vec!["py", "pyc"]);

    assert_eq!(cfg.logging.directory, Some(PathBuf::from("logs")));
    assert_eq!(cfg.logging.level, Some(ConfigLogLevel::Warn));
    assert_eq!(cfg.logging.format, LogFormat::Compact);
}

#[test]
fn empty_directory_strings_mean_unset() {
    let file = config_file(
        r#"
[executor]
execution_directory = ""
log_directory = "  "
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert!(cfg.executor.execution_directory.is_none());
    assert!(cfg.logging.directory.is_none());
}

#[test]
fn relative_interpreter_path_is_rejected() {
    let file = config_file(
        r#"
[executor.interpreter]
path = "python3"
"#,
    );

    match load_and_validate(file.path()) {
        Err(AutorunError::ConfigError(msg)) => {
            assert!(msg.contains("absolute"));
            assert!(msg.contains("python3"));
        }
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[test]
fn interpreter_needs_at_least_one_extension() {
    let file = config_file(
        r#"
[executor.interpreter]
path = "/usr/bin/python3"
extensions = []
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(AutorunError::ConfigError(_))
    ));
}

#[test]
fn blank_extension_token_is_rejected() {
    let file = config_file(
        r#"
[executor]
extensions_to_remove_from_pathext = ["py", "."]
"#,
    );

    match load_and_validate(file.path()) {
        Err(AutorunError::ConfigError(msg)) => {
            assert!(msg.contains("extensions_to_remove_from_pathext"));
        }
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[test]
fn wrong_value_types_are_toml_errors() {
    for contents in [
        "[executor]\nmax_process_runtime_seconds = \"soon\"\n",
        "[executor]\nenable = \"yes\"\n",
        "[executor]\nlog_level = \"loud\"\n",
        "[executor]\nmax_process_runtime_seconds = -1\n",
    ] {
        let file = config_file(contents);
        let result = load_from_path(file.path());
        assert!(
            matches!(result, Err(AutorunError::TomlError(_))),
            "{contents:?}: expected TomlError, got {:?}",
            result
        );
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/definitely/not/here/Autorun.toml");
    assert!(matches!(result, Err(AutorunError::IoError(_))));
}

#[test]
fn in_memory_config_is_validated_like_a_file() {
    let cfg = parse_config(
        "[executor]\nmax_process_runtime_seconds = 5\nextensions_to_remove_from_pathext = [\".PY\", \"py\"]\n",
    )
    .unwrap();
    assert_eq!(cfg.executor.max_runtime, Duration::from_secs(5));
    assert_eq!(cfg.executor.excluded_extensions, vec!["py".to_string()]);

    assert!(matches!(
        parse_config("[executor]\nextensions_to_remove_from_pathext = [\"\"]\n"),
        Err(AutorunError::ConfigError(_))
    ));
    assert!(matches!(parse_config("[executor"), Err(AutorunError::TomlError(_))));
}

#[test]
fn default_config_is_looked_up_in_the_working_directory() {
    assert_eq!(default_config_path(), PathBuf::from("Autorun.toml"));
}
