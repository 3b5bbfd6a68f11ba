//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat, Status};
use quill_core::config::AppConfig;
use quill_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration with secrets masked
    Show,
    /// Validate the loaded configuration
    Validate,
    /// Report which identity variables are set
    Presence,
}

/// Presence display row
#[derive(Debug, Serialize, Tabled)]
struct PresenceRow {
    /// Variable
    variable: &'static str,
    /// Status
    status: &'static str,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut masked = config.clone();
            mask(&mut masked.oauth.client_secret);
            mask(&mut masked.session.secret);
            output::json(&masked);
        }
        ConfigCommand::Validate => match config.validate() {
            Ok(()) => {
                output::status(Status::Ok, "Configuration is valid");
                output::field("Backend", &config.backend.base_url);
                output::field("Provider", &config.oauth.provider);
                output::field("Session cookie", &config.session.cookie_path);
                output::field("Credential store", &config.storage.path);
            }
            Err(e) => {
                output::status(Status::Fail, &format!("Configuration invalid: {}", e.message));
                return Err(e);
            }
        },
        ConfigCommand::Presence => {
            let report = config.presence();
            let rows = [
                ("oauth.client_id", report.client_id),
                ("oauth.client_secret", report.client_secret),
                ("session.base_url", report.base_url),
                ("session.secret", report.session_secret),
            ]
            .into_iter()
            .map(|(variable, present)| PresenceRow {
                variable,
                status: if present { "Present" } else { "Missing" },
            })
            .collect::<Vec<_>>();
            output::show(&rows, format);
        }
    }

    Ok(())
}

fn mask(secret: &mut Option<String>) {
    if secret.is_some() {
        *secret = Some("****".to_string());
    }
}
