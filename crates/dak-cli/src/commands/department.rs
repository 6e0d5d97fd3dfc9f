//! Department CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dak_core::error::AppError;
use dak_service::AppContext;
use dak_service::forms::DepartmentSelection;

use crate::output::{self, OutputFormat};

/// Arguments for department commands
#[derive(Debug, Args)]
pub struct DepartmentArgs {
    /// Department subcommand
    #[command(subcommand)]
    pub command: DepartmentCommand,
}

/// Department subcommands
#[derive(Debug, Subcommand)]
pub enum DepartmentCommand {
    /// List departments
    List,
    /// Add a custom department
    Add {
        /// Department name
        name: String,
    },
}

/// Department display row for table output
#[derive(Debug, Serialize, Tabled)]
struct DepartmentRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Custom")]
    custom: String,
}

/// Execute department commands
pub async fn execute(
    args: &DepartmentArgs,
    ctx: AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let departments = ctx.departments();

    match &args.command {
        DepartmentCommand::List => {
            let all = departments.list().await?;
            let selection = DepartmentSelection::new(&all);
            let rows: Vec<DepartmentRow> = all
                .iter()
                .filter(|d| !d.is_other())
                .map(|d| DepartmentRow {
                    name: d.name.clone(),
                    custom: if d.is_custom { "Yes" } else { "No" }.to_string(),
                })
                .collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!("Options: {}", selection.options().join(", "));
            }
        }
        DepartmentCommand::Add { name } => {
            let department = departments.add_custom(name).await?;
            output::print_success(&format!("Department '{}' added", department.name));
        }
    }

    Ok(())
}
