//! Resolved identity CLI command.

use crate::app::App;
use crate::commands::IdentityRow;
use crate::output::{self, OutputFormat};
use quill_core::config::AppConfig;
use quill_core::error::AppError;

/// Execute whoami
pub async fn execute(config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let mut app = App::build(config)?;
    let identity = app.resolve().await?;
    output::show(&[IdentityRow::from(&identity)], format);
    Ok(())
}
