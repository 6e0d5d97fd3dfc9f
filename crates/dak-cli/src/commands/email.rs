//! Email CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dak_core::error::AppError;
use dak_entity::email::EmailThread;
use dak_service::AppContext;
use dak_service::forms::EmailComposer;

use super::{input_error, parse_file_id};
use crate::output::{self, OutputFormat};

/// Arguments for email commands
#[derive(Debug, Args)]
pub struct EmailArgs {
    /// Email subcommand
    #[command(subcommand)]
    pub command: EmailCommand,
}

/// Email subcommands
#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send an email about a file
    Send {
        /// File ID
        file_id: String,
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Copied address (defaults to the configured office address)
        #[arg(long)]
        cc: Option<String>,
        /// Subject (defaults to "Regarding File: <title>")
        #[arg(short, long)]
        subject: Option<String>,
        /// Message body (prompted when omitted)
        #[arg(short, long)]
        body: Option<String>,
    },
    /// List emails sent about a file
    Threads {
        /// File ID
        file_id: String,
    },
}

/// Email thread display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ThreadRow {
    #[tabled(rename = "Sent")]
    created_at: String,
    #[tabled(rename = "To")]
    recipient: String,
    #[tabled(rename = "Cc")]
    cc: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&EmailThread> for ThreadRow {
    fn from(thread: &EmailThread) -> Self {
        Self {
            created_at: thread.created_at.format("%b %-d, %Y %-I:%M %p").to_string(),
            recipient: thread.recipient_email.clone(),
            cc: thread.cc_email.clone(),
            subject: thread.subject.clone(),
            status: thread.status.to_string(),
        }
    }
}

/// Execute email commands
pub async fn execute(
    args: &EmailArgs,
    ctx: AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let email = ctx.email();

    match &args.command {
        EmailCommand::Send {
            file_id,
            to,
            cc,
            subject,
            body,
        } => {
            let files = ctx.file_store();
            let file = files.get(parse_file_id(file_id)?).await?;

            let mut composer = EmailComposer::new(file.id, &file.title, &ctx.config.email);
            composer.recipient = to.clone();
            if let Some(cc) = cc {
                composer.cc = cc.clone();
            }
            if let Some(subject) = subject {
                composer.subject = subject.clone();
            }
            composer.body = match body {
                Some(b) => b.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Message")
                    .interact_text()
                    .map_err(input_error)?,
            };

            let (threads, notice) = composer.send(&files, &email).await?;
            output::print_notice(&notice);
            let rows: Vec<ThreadRow> = threads.iter().map(ThreadRow::from).collect();
            output::print_list(&rows, format);
        }
        EmailCommand::Threads { file_id } => {
            let threads = email.threads(parse_file_id(file_id)?).await?;
            let rows: Vec<ThreadRow> = threads.iter().map(ThreadRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
