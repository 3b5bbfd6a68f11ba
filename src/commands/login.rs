//! Direct login CLI command.

use clap::Args;

use crate::app::App;
use crate::commands::IdentityRow;
use crate::output::{self, OutputFormat, Status};
use quill_core::config::AppConfig;
use quill_core::error::AppError;

/// Arguments for direct login
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Display name
    #[arg(long, default_value = "")]
    pub name: String,
    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,
}

/// Execute direct login
pub async fn execute(
    args: &LoginArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut app = App::build(config)?;
    let current = app.resolve().await?;
    if current.is_authenticated() {
        output::status(Status::Warn, "Already signed in");
        output::show(&[IdentityRow::from(&current)], format);
        return Ok(());
    }

    let identity = app.reconciler.login_direct(&args.name, &args.email).await?;
    output::status(Status::Ok, "Logged in");
    output::show(&[IdentityRow::from(&identity)], format);
    Ok(())
}
