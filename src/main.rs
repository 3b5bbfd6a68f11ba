//! Quill identity CLI
//!
//! Drives the sign-in bridge, the session framework, and the identity
//! reconciler from the command line, with the session cookie and the
//! credential store persisted between invocations.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use quill_core::ErrorKind;
use quill_core::config::AppConfig;

mod app;
mod commands;
mod output;

use commands::Cli;
use output::Status;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config, cli.env.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    config.log_presence();

    if let Err(e) = cli.execute(config).await {
        tracing::error!(kind = %e.kind, "{}", e.message);
        match e.kind {
            ErrorKind::Validation => output::status(Status::Fail, &e.message),
            _ => output::status(Status::Fail, e.user_message()),
        }
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
