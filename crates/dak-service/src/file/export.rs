//! Spreadsheet export of the file list.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use dak_core::error::AppError;
use dak_entity::file::{FileRecord, StatusChange};

const HEADERS: [&str; 11] = [
    "File Number",
    "Title",
    "Type",
    "Department",
    "Date",
    "Status",
    "Needs Return",
    "Description",
    "Remarks",
    "Storage Path",
    "Status History",
];

/// One history entry as embedded in the export.
#[derive(Serialize)]
struct HistoryCell<'a> {
    status: &'a str,
    timestamp: String,
    reason: &'a str,
}

impl<'a> From<&'a StatusChange> for HistoryCell<'a> {
    fn from(change: &'a StatusChange) -> Self {
        Self {
            status: change.status.as_str(),
            timestamp: change.timestamp.format("%b %-d, %Y %-I:%M %p").to_string(),
            reason: change.reason.as_deref().unwrap_or_default(),
        }
    }
}

fn row(file: &FileRecord) -> Result<[String; 11], AppError> {
    let history: Vec<HistoryCell<'_>> = file.status_history.iter().map(HistoryCell::from).collect();
    Ok([
        file.file_number.clone(),
        file.title.clone(),
        file.file_type.to_string(),
        file.department.clone(),
        file.date.format("%b %-d, %Y").to_string(),
        file.status.to_string(),
        if file.needs_return { "Yes" } else { "No" }.to_string(),
        file.description.clone(),
        file.remarks.clone(),
        file.storage_path.clone().unwrap_or_default(),
        serde_json::to_string(&history)?,
    ])
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::with_source(
        dak_core::error::ErrorKind::Storage,
        format!("Failed to write export: {err}"),
        err,
    )
}

/// Write `files` as CSV and return the number of data rows.
pub fn write_csv<W: Write>(files: &[FileRecord], writer: W) -> Result<usize, AppError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADERS).map_err(csv_error)?;
    for file in files {
        csv.write_record(row(file)?).map_err(csv_error)?;
    }
    csv.flush()?;
    Ok(files.len())
}

/// Export `files` to a CSV file at `path`.
pub fn export_csv(files: &[FileRecord], path: &Path) -> Result<usize, AppError> {
    let out = File::create(path).map_err(|e| {
        AppError::storage(format!("Failed to create '{}': {e}", path.display()))
    })?;
    let rows = write_csv(files, out)?;
    info!(path = %path.display(), rows, "File list exported");
    Ok(rows)
}
