//! File tracking CLI commands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dak_client::Attachment;
use dak_core::error::AppError;
use dak_entity::department::OTHER_DEPARTMENT;
use dak_entity::file::{FileRecord, FileType, StatusChange};
use dak_service::file::{available_actions, export_csv};
use dak_service::forms::{CreateFileForm, DepartmentChoice, DepartmentSelection, EditFileForm};
use dak_service::{AppContext, FileAction, FileColumn, TableState};

use super::{input_error, parse_file_id};
use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List files
    List {
        /// Case-insensitive text to search for
        #[arg(short, long)]
        search: Option<String>,
        /// Column to sort by; repeat the same column to sort descending
        #[arg(long = "sort")]
        sort: Vec<FileColumn>,
        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u64,
        /// Export the filtered list to a CSV file
        #[arg(long, value_name = "PATH")]
        export: Option<Option<PathBuf>>,
    },
    /// Show one file
    Show {
        /// File ID
        id: String,
    },
    /// Show the status history of a file
    History {
        /// File ID
        id: String,
    },
    /// Generate the next file number for a type
    Number {
        /// File type: dispatched, received or internal
        file_type: FileType,
    },
    /// Create a file
    Create(CreateArgs),
    /// Edit a file
    Edit(EditArgs),
    /// Delete a file
    Delete {
        /// File ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Mark a dispatched-type file as dispatched
    Dispatch {
        /// File ID
        id: String,
    },
    /// Mark a received file as returned
    Return {
        /// File ID
        id: String,
    },
    /// Reopen a finished file
    Undo {
        /// File ID
        id: String,
        /// Why the status is being undone
        #[arg(short, long)]
        reason: Option<String>,
    },
}

/// Arguments for `file create`
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// File type
    #[arg(short = 't', long = "type", default_value = "dispatched")]
    pub file_type: FileType,
    /// Title (prompted when omitted)
    #[arg(long)]
    pub title: Option<String>,
    /// Department name, or "Other" together with --other
    #[arg(short, long)]
    pub department: Option<String>,
    /// Custom department name used with "Other"
    #[arg(long)]
    pub other: Option<String>,
    /// Date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// The file is expected to come back
    #[arg(long)]
    pub needs_return: bool,
    /// Description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Remarks
    #[arg(long, default_value = "")]
    pub remarks: String,
    /// Document to attach
    #[arg(short, long)]
    pub attachment: Option<PathBuf>,
}

/// Arguments for `file edit`
#[derive(Debug, Args)]
pub struct EditArgs {
    /// File ID
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(short = 't', long = "type")]
    pub file_type: Option<FileType>,
    #[arg(short, long)]
    pub department: Option<String>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub remarks: Option<String>,
    #[arg(long)]
    pub needs_return: Option<bool>,
}

/// File display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "File Number")]
    file_number: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    file_type: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Return")]
    needs_return: String,
}

impl From<&FileRecord> for FileRow {
    fn from(file: &FileRecord) -> Self {
        Self {
            id: file.id.to_string(),
            file_number: file.file_number.clone(),
            title: file.title.clone(),
            file_type: file.file_type.to_string(),
            department: file.department.clone(),
            date: file.date.format("%b %-d, %Y").to_string(),
            status: file.status.to_string(),
            needs_return: if file.needs_return { "Yes" } else { "No" }.to_string(),
        }
    }
}

/// History display row for table output
#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "When")]
    timestamp: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&StatusChange> for HistoryRow {
    fn from(change: &StatusChange) -> Self {
        Self {
            status: change.status.to_string(),
            timestamp: change.timestamp.format("%b %-d, %Y %-I:%M %p").to_string(),
            reason: change.reason.clone().unwrap_or_default(),
        }
    }
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    ctx: AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = ctx.file_store();

    match &args.command {
        FileCommand::List {
            search,
            sort,
            page,
            export,
        } => {
            let mut table = TableState::new(ctx.config.table.page_size);
            for column in sort {
                table.toggle_sort(*column);
            }
            if let Some(search) = search {
                table.set_search(search.as_str());
            }
            table.set_page(*page);

            let files = store.list().await?;

            if let Some(path) = export {
                let path = path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(&ctx.config.table.export_path));
                let rows = export_csv(&table.filtered(files.clone()), &path)?;
                output::print_success(&format!(
                    "Exported {rows} files to '{}'",
                    path.display()
                ));
            }

            let view = table.view(files);
            match format {
                OutputFormat::Json => output::print_json(&view),
                OutputFormat::Table => {
                    let rows: Vec<FileRow> = view.page.items.iter().map(FileRow::from).collect();
                    output::print_list(&rows, format);
                    if let Some(sort) = &view.sort {
                        println!("Sorted by {}", view.header(sort.field));
                    }
                    println!("{}", view.summary());
                }
            }
        }
        FileCommand::Show { id } => {
            let file = store.get(parse_file_id(id)?).await?;
            match format {
                OutputFormat::Json => output::print_json(&file),
                OutputFormat::Table => print_details(&file),
            }
        }
        FileCommand::History { id } => {
            let file = store.get(parse_file_id(id)?).await?;
            let rows: Vec<HistoryRow> = file.status_history.iter().map(HistoryRow::from).collect();
            output::print_list(&rows, format);
        }
        FileCommand::Number { file_type } => {
            let number = ctx.number_generator().generate(*file_type).await?;
            match format {
                OutputFormat::Json => output::print_json(&number),
                OutputFormat::Table => println!("{number}"),
            }
        }
        FileCommand::Create(create) => {
            let outcome = create_file(&ctx, create).await?;
            for notice in &outcome.notices {
                output::print_notice(notice);
            }
            match format {
                OutputFormat::Json => output::print_json(&outcome.file),
                OutputFormat::Table => print_details(&outcome.file),
            }
        }
        FileCommand::Edit(edit) => {
            let file = store.get(parse_file_id(&edit.id)?).await?;
            let mut form = EditFileForm::from_record(&file);
            if let Some(title) = &edit.title {
                form.title = title.clone();
            }
            if let Some(file_type) = edit.file_type {
                form.file_type = file_type;
            }
            if let Some(department) = &edit.department {
                form.department = department.clone();
            }
            if let Some(date) = edit.date {
                form.date = date;
            }
            if let Some(description) = &edit.description {
                form.description = description.clone();
            }
            if let Some(remarks) = &edit.remarks {
                form.remarks = remarks.clone();
            }
            if let Some(needs_return) = edit.needs_return {
                form.needs_return = needs_return;
            }

            let updated = form.submit(&store).await?;
            output::print_success(&format!("File '{}' updated", updated.file_number));
        }
        FileCommand::Delete { id, yes } => {
            let file = store.get(parse_file_id(id)?).await?;
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete file '{}' ({}) and its history?",
                        file.file_number, file.title
                    ))
                    .default(false)
                    .interact()
                    .map_err(input_error)?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            store.delete(file.id).await?;
            output::print_success(&format!("File '{}' deleted", file.file_number));
        }
        FileCommand::Dispatch { id } => {
            let file = ctx.lifecycle().dispatch(parse_file_id(id)?).await?;
            output::print_success(&format!("File '{}' marked as dispatched", file.file_number));
        }
        FileCommand::Return { id } => {
            let file = ctx.lifecycle().mark_returned(parse_file_id(id)?).await?;
            output::print_success(&format!("File '{}' marked as returned", file.file_number));
        }
        FileCommand::Undo { id, reason } => {
            let reason = match reason {
                Some(r) => r.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Reason for undoing the status")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(input_error)?,
            };
            let file = ctx.lifecycle().undo(parse_file_id(id)?, &reason).await?;
            output::print_success(&format!(
                "File '{}' is back to {}",
                file.file_number, file.status
            ));
        }
    }

    Ok(())
}

async fn create_file(
    ctx: &AppContext,
    args: &CreateArgs,
) -> Result<dak_service::forms::CreateOutcome, AppError> {
    let departments = ctx.departments();
    let selection = DepartmentSelection::new(&departments.list().await?);

    let mut form = CreateFileForm::default();
    form.set_file_type(args.file_type);
    form.file_number = ctx.number_generator().generate(args.file_type).await?;
    form.title = match &args.title {
        Some(t) => t.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Title")
            .interact_text()
            .map_err(input_error)?,
    };
    form.department = choose_department(&selection, args)?;
    if let Some(date) = args.date {
        form.date = date;
    }
    form.needs_return = args.needs_return && args.file_type.allows_return();
    form.description = args.description.clone();
    form.remarks = args.remarks.clone();
    if let Some(path) = &args.attachment {
        form.attachment = Some(Attachment::from_path(path).await?);
    }

    form.submit(&ctx.file_store(), &departments).await
}

fn choose_department(
    selection: &DepartmentSelection,
    args: &CreateArgs,
) -> Result<DepartmentChoice, AppError> {
    if let Some(department) = &args.department {
        return selection.choose(department, args.other.as_deref());
    }
    if let Some(other) = &args.other {
        return selection.choose(OTHER_DEPARTMENT, Some(other));
    }

    let options = selection.options();
    let picked = dialoguer::Select::new()
        .with_prompt("Department")
        .items(&options)
        .default(0)
        .interact()
        .map_err(input_error)?;
    let label = options.get(picked).copied().unwrap_or(OTHER_DEPARTMENT);

    if label == OTHER_DEPARTMENT {
        let custom: String = dialoguer::Input::new()
            .with_prompt("Department name")
            .interact_text()
            .map_err(input_error)?;
        selection.choose(label, Some(&custom))
    } else {
        selection.choose(label, None)
    }
}

fn print_details(file: &FileRecord) {
    output::print_kv("ID", &file.id.to_string());
    output::print_kv("File Number", &file.file_number);
    output::print_kv("Title", &file.title);
    output::print_kv("Type", file.file_type.as_str());
    output::print_kv("Department", &file.department);
    output::print_kv("Date", &file.date.format("%b %-d, %Y").to_string());
    output::print_kv("Status", file.status.as_str());
    output::print_kv("Needs Return", if file.needs_return { "Yes" } else { "No" });
    if !file.description.is_empty() {
        output::print_kv("Description", &file.description);
    }
    if !file.remarks.is_empty() {
        output::print_kv("Remarks", &file.remarks);
    }
    if let Some(name) = file.attachment_name() {
        output::print_kv("Attachment", name);
    }
    let actions: Vec<&str> = available_actions(file).iter().map(FileAction::label).collect();
    if !actions.is_empty() {
        output::print_kv("Actions", &actions.join(", "));
    }
}
