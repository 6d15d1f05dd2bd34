//! `starforge`: batch-generate celestial-body sprite sheets.

use std::process::ExitCode;

use clap::Parser;
use starforge_cli::run_batch;
use starforge_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    starforge_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run_batch(&config, &args) {
        Ok(summary) => {
            info!(
                generated = summary.generated,
                cached = summary.cached,
                failed = summary.failed,
                rejected = summary.rejected,
                "batch complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "could not start workers");
            ExitCode::FAILURE
        }
    }
}
