//! Provider sign-in CLI command.

use clap::Args;

use crate::app::App;
use crate::commands::IdentityRow;
use crate::output::{self, OutputFormat, Status};
use quill_auth::{SignInErrorCode, SignInOutcome};
use quill_core::config::AppConfig;
use quill_core::error::AppError;
use quill_entity::ProviderAssertion;

/// Arguments for a provider callback
#[derive(Debug, Args)]
pub struct SignInArgs {
    /// Provider that asserted the identity
    #[arg(long, default_value = "google")]
    pub provider: String,
    /// Provider subject identifier
    #[arg(long)]
    pub subject: String,
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    /// Email address
    #[arg(long)]
    pub email: Option<String>,
    /// Avatar URL
    #[arg(long)]
    pub image: Option<String>,
}

/// Execute sign-in
pub async fn execute(
    args: &SignInArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut app = App::build(config)?;

    let mut assertion = ProviderAssertion::new(&args.subject);
    if let Some(name) = &args.name {
        assertion = assertion.with_name(name);
    }
    if let Some(email) = &args.email {
        assertion = assertion.with_email(email);
    }
    if let Some(image) = &args.image {
        assertion = assertion.with_image(image);
    }

    match app.framework.sign_in(&args.provider, &assertion).await? {
        SignInOutcome::SignedIn(_) => {
            let identity = app.resolve().await?;
            output::status(Status::Ok, "Signed in");
            output::show(&[IdentityRow::from(&identity)], format);
        }
        SignInOutcome::Rejected { code, redirect } => {
            report_rejection(code, &redirect);
            return Err(AppError::authentication(format!("Sign-in rejected: {code}")));
        }
    }
    Ok(())
}

fn report_rejection(code: SignInErrorCode, redirect: &str) {
    output::status(Status::Fail, code.message());
    output::field("Redirect", redirect);
}
