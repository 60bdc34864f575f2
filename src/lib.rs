// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::errors::Result;
use crate::exec::Executor;

/// High-level entry point used by `main.rs`.
///
/// Resolves the target, then either prints the command (`--dry-run`) or runs
/// it and returns the child's exit code. A disabled executor returns 0
/// without running anything.
pub async fn run(args: CliArgs, cfg: ConfigFile) -> Result<i32> {
    if !cfg.executor.enable {
        info!(path = %args.target.display(), "executor disabled in config; skipping run");
        return Ok(0);
    }

    let mut executor = Executor::new(cfg.executor, &args.target)?;

    if args.dry_run {
        print_dry_run(&executor)?;
        return Ok(0);
    }

    executor.execute().await
}

/// Simple dry-run output: the resolved target, settings and command.
fn print_dry_run(executor: &Executor) -> Result<()> {
    let settings = executor.settings();
    let command = executor.command()?;

    println!("autorun dry-run");
    println!("  target = {}", executor.target().display());
    println!("  max_runtime = {}s", settings.max_runtime.as_secs());
    if let Some(ref dir) = settings.execution_directory {
        println!("  execution_directory = {}", dir.display());
    }
    if !settings.excluded_extensions.is_empty() {
        println!("  excluded_extensions = {:?}", settings.excluded_extensions);
    }
    if let Some(ref rule) = settings.interpreter {
        println!(
            "  interpreter = {} ({:?})",
            rule.program.display(),
            rule.extensions
        );
    }
    println!("  command = {command}");

    debug!("dry-run complete (no execution)");
    Ok(())
}
