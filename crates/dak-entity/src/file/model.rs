//! File record entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use dak_core::types::FileId;

use super::file_type::FileType;
use super::status::{FileStatus, StatusChange};
use crate::wire;

/// A tracked correspondence record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique file identifier.
    pub id: FileId,
    /// Human-facing number such as `FT/DISP/004`.
    #[serde(alias = "fileNumber")]
    pub file_number: String,
    /// Subject line of the correspondence.
    pub title: String,
    /// Direction of the correspondence.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Owning department name.
    pub department: String,
    /// Calendar date of the correspondence.
    #[serde(with = "wire::flexible_date")]
    pub date: NaiveDate,
    /// Current processing status.
    pub status: FileStatus,
    /// Free-form description.
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub description: String,
    /// Free-form remarks.
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub remarks: String,
    /// Whether the file is expected to come back.
    #[serde(default, alias = "needsReturn", deserialize_with = "wire::null_as_false")]
    pub needs_return: bool,
    /// Location of the uploaded attachment, if any.
    #[serde(
        default,
        alias = "storagePath",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::empty_as_none"
    )]
    pub storage_path: Option<String>,
    /// When the record was created.
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last updated.
    #[serde(default, alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Status transitions, oldest first.
    #[serde(default, alias = "statusHistory", deserialize_with = "sorted_history")]
    pub status_history: Vec<StatusChange>,
}

impl FileRecord {
    /// Build a record from a creation payload.
    pub fn from_new(new: NewFile) -> Self {
        let now = Utc::now();
        Self {
            id: new.id,
            file_number: new.file_number,
            title: new.title,
            file_type: new.file_type,
            department: new.department,
            date: new.date,
            status: new.status,
            description: new.description,
            remarks: new.remarks,
            needs_return: new.needs_return,
            storage_path: new.storage_path,
            created_at: Some(now),
            updated_at: Some(now),
            status_history: Vec::new(),
        }
    }

    /// Whether the file is in a done state.
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// The most recent history entry.
    pub fn latest_change(&self) -> Option<&StatusChange> {
        self.status_history.last()
    }

    /// Set the status and append the matching history entry.
    pub fn record_status(&mut self, status: FileStatus, reason: Option<String>) -> StatusChange {
        let mut change = StatusChange::now(status, reason);
        change.file = Some(self.id);
        self.status = status;
        self.updated_at = Some(change.timestamp);
        self.status_history.push(change.clone());
        change
    }

    /// Apply the fields present in a whole-record edit.
    pub fn apply_update(&mut self, update: &FileUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(file_type) = update.file_type {
            self.file_type = file_type;
        }
        if let Some(department) = &update.department {
            self.department = department.clone();
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(remarks) = &update.remarks {
            self.remarks = remarks.clone();
        }
        if let Some(needs_return) = update.needs_return {
            self.needs_return = needs_return;
        }
        if !self.file_type.allows_return() {
            self.needs_return = false;
        }
        self.updated_at = Some(Utc::now());
    }

    /// Last path segment of the attachment location.
    pub fn attachment_name(&self) -> Option<&str> {
        self.storage_path
            .as_deref()
            .and_then(|path| path.rsplit('/').find(|segment| !segment.is_empty()))
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFile {
    /// Client-generated identifier.
    pub id: FileId,
    /// Generated file number.
    pub file_number: String,
    /// Subject line.
    pub title: String,
    /// Direction of the correspondence.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Owning department name.
    pub department: String,
    /// Calendar date.
    #[serde(with = "wire::flexible_date")]
    pub date: NaiveDate,
    /// Initial status.
    pub status: FileStatus,
    /// Free-form description.
    pub description: String,
    /// Free-form remarks.
    pub remarks: String,
    /// Whether the file is expected to come back.
    pub needs_return: bool,
    /// Uploaded attachment location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
}

/// A whole-record edit. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileUpdate {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    /// New department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New date, sent as `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New remarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// New needs-return flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_return: Option<bool>,
}

impl FileUpdate {
    /// Whether the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn sorted_history<'de, D>(deserializer: D) -> Result<Vec<StatusChange>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut history = Option::<Vec<StatusChange>>::deserialize(deserializer)?.unwrap_or_default();
    history.sort_by_key(|change| change.timestamp);
    Ok(history)
}
