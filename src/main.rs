//! Instagram Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use instagram_downloader::{
    cli::Args,
    config::{validate_config, Config},
    error::{exit_codes, Result},
    output::print_error,
    run,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => {
            print_error(&format!("{}", e));
            return ExitCode::from(exit_codes::FAILURE as u8);
        }
    };

    let outcome = run(&config).await;
    ExitCode::from(outcome.exit_code() as u8)
}

/// Load the optional config file, merge CLI arguments over it and validate.
fn load_config(args: Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    Ok(config)
}
