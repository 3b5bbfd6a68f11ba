//! Framework session CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::app::App;
use crate::output::{self, OutputFormat, Status};
use quill_core::config::AppConfig;
use quill_core::error::AppError;
use quill_entity::SessionStatus;
use quill_store::fingerprint;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Show the materialized framework session
    Show,
    /// Show what the credential store holds
    Store,
}

/// Session display row
#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    /// Status
    status: String,
    /// User ID
    user_id: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Credential
    credential: String,
    /// Expires
    expires: String,
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let app = App::build(config)?;

    match &args.command {
        SessionCommand::Show => {
            let status = app.framework.status();
            let row = match &status {
                SessionStatus::Authenticated(session) => SessionRow {
                    status: status.as_str().to_string(),
                    user_id: session.user.id.clone().unwrap_or_else(|| "-".into()),
                    email: session.user.email.clone().unwrap_or_else(|| "-".into()),
                    role: session.user.role.clone().unwrap_or_else(|| "-".into()),
                    credential: session
                        .credential()
                        .map(fingerprint)
                        .unwrap_or_else(|| "-".into()),
                    expires: session.expires.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                },
                _ => SessionRow {
                    status: status.as_str().to_string(),
                    user_id: "-".into(),
                    email: "-".into(),
                    role: "-".into(),
                    credential: "-".into(),
                    expires: "-".into(),
                },
            };
            output::show(&[row], format);
        }
        SessionCommand::Store => match app.store.get()? {
            Some(credential) => {
                output::field("Key", &app.config.storage.key);
                output::field("Credential", &fingerprint(&credential));
            }
            None => output::status(Status::Warn, "No credential stored"),
        },
    }

    Ok(())
}
