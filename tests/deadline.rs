#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use autorun::config::DEFAULT_MAX_RUNTIME;
use autorun::exec::{run_to_completion, CommandLine, Executor, RunOptions};
use autorun_test_utils::builders::SettingsBuilder;
use autorun_test_utils::{init_tracing, with_timeout, RecordingLog};

const KILL_MESSAGE: &str = "Killing process as death time has elapsed.";

#[tokio::test]
async fn zero_runtime_kills_a_sleeping_child() {
    init_tracing();
    let log = RecordingLog::new();
    let started = Instant::now();

    let code = with_timeout(run_to_completion(
        &CommandLine::new("/bin/sh").arg("-c").arg("exec sleep 1"),
        &RunOptions::new(Duration::ZERO),
        Arc::new(log.clone()),
    ))
    .await
    .unwrap();

    assert!(
        started.elapsed() < Duration::from_millis(800),
        "took {:?}",
        started.elapsed()
    );
    assert_ne!(code, 0);
    assert_eq!(log.lines().iter().filter(|l| *l == KILL_MESSAGE).count(), 1);

    let lines = log.lines();
    assert_eq!(lines[lines.len() - 2], KILL_MESSAGE);
    assert_eq!(lines[lines.len() - 1], format!(".. Exit Code: {code}"));
}

#[tokio::test]
async fn output_before_the_deadline_is_still_logged() {
    init_tracing();
    let log = RecordingLog::new();

    let code = with_timeout(run_to_completion(
        &CommandLine::new("/bin/sh")
            .arg("-c")
            .arg("echo started; exec sleep 5"),
        &RunOptions::new(Duration::from_millis(300)),
        Arc::new(log.clone()),
    ))
    .await
    .unwrap();

    assert_eq!(code, -9);
    assert_eq!(log.output_lines(), vec![">> started"]);
    assert!(log.contains(KILL_MESSAGE));
}

#[tokio::test]
async fn executor_enforces_configured_max_runtime() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("slow");
    std::fs::write(&script, "#!/bin/sh\nexec sleep 1\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let log = RecordingLog::new();
    let settings = SettingsBuilder::new().max_runtime(Duration::ZERO).build();
    let mut executor = Executor::with_log(settings, &script, Arc::new(log.clone())).unwrap();

    let started = Instant::now();
    let code = with_timeout(executor.execute()).await.unwrap();

    assert!(started.elapsed() < Duration::from_millis(800));
    assert_ne!(code, 0);
    assert!(log.contains(KILL_MESSAGE));
}

#[tokio::test]
async fn unrepresentable_max_runtime_never_expires() {
    init_tracing();
    let log = RecordingLog::new();

    let code = with_timeout(run_to_completion(
        &CommandLine::new("/bin/sh")
            .arg("-c")
            .arg("echo a; sleep 0.3; echo b"),
        &RunOptions::new(Duration::MAX),
        Arc::new(log.clone()),
    ))
    .await
    .unwrap();

    assert_eq!(code, 0);
    assert_eq!(log.output_lines(), vec![">> a", ">> b"]);
    assert!(!log.contains(KILL_MESSAGE));
}

#[tokio::test]
async fn default_max_runtime_lets_the_child_finish() {
    init_tracing();
    let log = RecordingLog::new();

    let code = with_timeout(run_to_completion(
        &CommandLine::new("/bin/sh").arg("-c").arg("sleep 0.2; exit 3"),
        &RunOptions::new(DEFAULT_MAX_RUNTIME),
        Arc::new(log.clone()),
    ))
    .await
    .unwrap();

    assert_eq!(code, 3);
    assert!(!log.contains(KILL_MESSAGE));
}

#[tokio::test]
async fn deadline_kill_reaches_grandchildren_of_a_script() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("slow");
    std::fs::write(&script, "#!/bin/sh\nsleep 3\necho done\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let log = RecordingLog::new();
    let settings = SettingsBuilder::new().max_runtime(Duration::ZERO).build();
    let mut executor = Executor::with_log(settings, &script, Arc::new(log.clone())).unwrap();

    let started = Instant::now();
    let code = with_timeout(executor.execute()).await.unwrap();

    assert!(
        started.elapsed() < Duration::from_millis(800),
        "took {:?}",
        started.elapsed()
    );
    assert_eq!(code, -9);
    assert!(log.output_lines().is_empty());
    assert!(log.contains(KILL_MESSAGE));
}

#[tokio::test]
async fn deadline_still_applies_to_a_background_child_holding_the_output() {
    init_tracing();
    let log = RecordingLog::new();
    let started = Instant::now();

    let code = with_timeout(run_to_completion(
        &CommandLine::new("/bin/sh")
            .arg("-c")
            .arg("sleep 3 & echo started"),
        &RunOptions::new(Duration::from_millis(300)),
        Arc::new(log.clone()),
    ))
    .await
    .unwrap();

    assert!(
        started.elapsed() < Duration::from_secs(2),
        "took {:?}",
        started.elapsed()
    );
    assert_eq!(code, 0);
    assert_eq!(log.output_lines(), vec![">> started"]);
    assert!(log.contains(KILL_MESSAGE));
    assert_eq!(log.lines().last().unwrap(), ".. Exit Code: 0");
}
