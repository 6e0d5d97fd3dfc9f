//! Authentication CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use dak_core::config::AppConfig;
use dak_core::error::AppError;
use dak_entity::user::Credentials;
use dak_service::AppContext;

use super::input_error;
use crate::output::{self, OutputFormat};

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in
    Login {
        /// Login email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        /// Login email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Debug, Serialize)]
struct WhoAmI<'a> {
    id: &'a str,
    email: &'a str,
    backend: &'a str,
}

/// Execute auth commands
pub async fn execute(
    args: &AuthArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = AppContext::bootstrap(config).await?;
    let auth = ctx.auth();

    match &args.command {
        AuthCommand::Login { email, password } => {
            let email = prompt_email(email.as_deref())?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(input_error)?,
            };

            let user = auth.login(&Credentials::new(email, password)).await?;
            output::print_success(&format!("Signed in as {}", user.email));
        }
        AuthCommand::Register { email, password } => {
            let email = prompt_email(email.as_deref())?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(input_error)?,
            };

            let user = auth.register(&Credentials::new(email, password)).await?;
            output::print_success(&format!("Account created for {}", user.email));
        }
        AuthCommand::Logout => {
            auth.logout().await?;
            output::print_success("Signed out");
        }
        AuthCommand::Whoami => {
            let user = ctx.guard().require().await?;
            let info = WhoAmI {
                id: &user.id,
                email: &user.email,
                backend: ctx.client.backend_name(),
            };
            match format {
                OutputFormat::Json => output::print_json(&info),
                OutputFormat::Table => {
                    output::print_kv("Email", info.email);
                    output::print_kv("User ID", info.id);
                    output::print_kv("Backend", info.backend);
                }
            }
        }
    }

    Ok(())
}

fn prompt_email(email: Option<&str>) -> Result<String, AppError> {
    match email {
        Some(e) => Ok(e.to_string()),
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(input_error),
    }
}
