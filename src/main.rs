// src/main.rs

use autorun::config::load_and_validate;
use autorun::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("autorun error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    let cfg = load_and_validate(&args.config)?;
    logging::init_logging(args.log_level, &cfg.logging)?;
    Ok(run(args, cfg).await?)
}
