//! CLI command definitions and dispatch.

pub mod auth;
pub mod config;
pub mod department;
pub mod email;
pub mod file;

use clap::{Parser, Subcommand};

use dak_core::config::AppConfig;
use dak_core::error::AppError;
use dak_core::types::FileId;
use dak_service::AppContext;

use crate::output::OutputFormat;

/// DAK — document and correspondence file tracking
#[derive(Debug, Parser)]
#[command(name = "dak", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

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
    /// Sign in, register and sign out
    Auth(auth::AuthArgs),
    /// Tracked files
    File(file::FileArgs),
    /// Department list
    Department(department::DepartmentArgs),
    /// Email about files
    Email(email::EmailArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Auth(args) => auth::execute(args, config, self.format).await,
            Commands::File(args) => file::execute(args, protected(config).await?, self.format).await,
            Commands::Department(args) => {
                department::execute(args, protected(config).await?, self.format).await
            }
            Commands::Email(args) => {
                email::execute(args, protected(config).await?, self.format).await
            }
            Commands::Config(args) => config::execute(args, &self.config, config, self.format),
        }
    }
}

/// Build the context and check the session once before a protected command.
async fn protected(config: AppConfig) -> Result<AppContext, AppError> {
    let ctx = AppContext::bootstrap(config).await?;
    ctx.guard().require().await?;
    Ok(ctx)
}

/// Parse a file ID argument.
pub fn parse_file_id(raw: &str) -> Result<FileId, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid file ID: '{raw}'")))
}

/// Map a prompt failure into an application error.
pub fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {e}"))
}
