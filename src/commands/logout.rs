//! Logout CLI command.

use crate::app::App;
use crate::output::{self, Status};
use quill_core::config::AppConfig;
use quill_core::error::AppError;

/// Execute logout
pub async fn execute(config: AppConfig) -> Result<(), AppError> {
    let app = App::build(config)?;
    let outcome = app.context.logout().await;

    if outcome.framework_cleared {
        output::status(Status::Ok, "Signed out");
    } else {
        output::status(Status::Warn, "Signed out locally; the session framework did not confirm");
    }
    output::field("Redirect", &outcome.redirect);
    Ok(())
}
