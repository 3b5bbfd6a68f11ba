//! CLI command definitions and dispatch.

pub mod config;
pub mod login;
pub mod logout;
pub mod session;
pub mod sign_in;
pub mod whoami;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::OutputFormat;
use quill_core::config::AppConfig;
use quill_core::error::AppError;
use quill_entity::ResolvedIdentity;

/// Quill identity reconciliation for browser sessions
#[derive(Debug, Parser)]
#[command(name = "quill", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}`
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Complete a provider sign-in through the bridge
    SignIn(sign_in::SignInArgs),
    /// Sign in directly against the backend
    Login(login::LoginArgs),
    /// Show the resolved identity
    Whoami,
    /// Sign out everywhere
    Logout,
    /// Inspect the framework session
    Session(session::SessionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Config(args) => config::execute(args, config, self.format).await,
            Commands::SignIn(args) => sign_in::execute(args, config, self.format).await,
            Commands::Login(args) => login::execute(args, config, self.format).await,
            Commands::Whoami => whoami::execute(config, self.format).await,
            Commands::Logout => logout::execute(config).await,
            Commands::Session(args) => session::execute(args, config, self.format).await,
        }
    }
}

/// Identity display row
#[derive(Debug, Serialize, Tabled)]
pub struct IdentityRow {
    /// State
    state: String,
    /// User ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Admin
    admin: String,
    /// Error
    error: String,
}

impl From<&ResolvedIdentity> for IdentityRow {
    fn from(identity: &ResolvedIdentity) -> Self {
        let user = identity.user();
        Self {
            state: identity.state().to_string(),
            id: user.and_then(|u| u.id.clone()).unwrap_or_else(|| "-".into()),
            name: user.map(|u| u.name.clone()).unwrap_or_else(|| "-".into()),
            email: user.map(|u| u.email.clone()).unwrap_or_else(|| "-".into()),
            role: user.and_then(|u| u.role.clone()).unwrap_or_else(|| "-".into()),
            admin: if identity.is_admin() { "✓" } else { "✗" }.to_string(),
            error: identity.error().unwrap_or("-").to_string(),
        }
    }
}
