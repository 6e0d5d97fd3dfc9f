//! Sortable columns of the file table.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use dak_core::error::AppError;
use dak_entity::file::FileRecord;

/// A column of the file table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileColumn {
    FileNumber,
    Title,
    Type,
    Department,
    Date,
    Status,
    Description,
    Remarks,
    NeedsReturn,
    StoragePath,
    CreatedAt,
    UpdatedAt,
}

impl FileColumn {
    /// Every column in display order.
    pub const ALL: [FileColumn; 12] = [
        Self::FileNumber,
        Self::Title,
        Self::Type,
        Self::Department,
        Self::Date,
        Self::Status,
        Self::Description,
        Self::Remarks,
        Self::NeedsReturn,
        Self::StoragePath,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Return the column as its command-line name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileNumber => "file_number",
            Self::Title => "title",
            Self::Type => "type",
            Self::Department => "department",
            Self::Date => "date",
            Self::Status => "status",
            Self::Description => "description",
            Self::Remarks => "remarks",
            Self::NeedsReturn => "needs_return",
            Self::StoragePath => "storage_path",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    /// Table header.
    pub fn header(&self) -> &'static str {
        match self {
            Self::FileNumber => "File Number",
            Self::Title => "Title",
            Self::Type => "Type",
            Self::Department => "Department",
            Self::Date => "Date",
            Self::Status => "Status",
            Self::Description => "Description",
            Self::Remarks => "Remarks",
            Self::NeedsReturn => "Needs Return",
            Self::StoragePath => "Storage Path",
            Self::CreatedAt => "Created",
            Self::UpdatedAt => "Updated",
        }
    }

    /// The value of this column for `file`.
    pub fn value(&self, file: &FileRecord) -> CellValue {
        match self {
            Self::FileNumber => CellValue::text(&file.file_number),
            Self::Title => CellValue::text(&file.title),
            Self::Type => CellValue::text(file.file_type.as_str()),
            Self::Department => CellValue::text(&file.department),
            Self::Date => CellValue::Date(file.date),
            Self::Status => CellValue::text(file.status.as_str()),
            Self::Description => CellValue::text(&file.description),
            Self::Remarks => CellValue::text(&file.remarks),
            Self::NeedsReturn => CellValue::Bool(file.needs_return),
            Self::StoragePath => file
                .storage_path
                .as_deref()
                .map_or(CellValue::Missing, CellValue::text),
            Self::CreatedAt => file.created_at.map_or(CellValue::Missing, CellValue::Timestamp),
            Self::UpdatedAt => file.updated_at.map_or(CellValue::Missing, CellValue::Timestamp),
        }
    }
}

impl fmt::Display for FileColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "filenumber" | "number" => Ok(Self::FileNumber),
            "title" => Ok(Self::Title),
            "type" => Ok(Self::Type),
            "department" => Ok(Self::Department),
            "date" => Ok(Self::Date),
            "status" => Ok(Self::Status),
            "description" => Ok(Self::Description),
            "remarks" => Ok(Self::Remarks),
            "needsreturn" => Ok(Self::NeedsReturn),
            "storagepath" => Ok(Self::StoragePath),
            "createdat" | "created" => Ok(Self::CreatedAt),
            "updatedat" | "updated" => Ok(Self::UpdatedAt),
            _ => Err(AppError::validation(format!("Unknown column: '{s}'"))),
        }
    }
}

/// A comparable cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// No value; orders before everything else.
    Missing,
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Bool(bool),
}

impl CellValue {
    /// Text cell; blank text counts as missing.
    pub fn text(value: &str) -> Self {
        if value.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(value.to_string())
        }
    }

    /// Natural ordering within one column.
    pub fn compare(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Missing, Missing) => Ordering::Equal,
            (Missing, _) => Ordering::Less,
            (_, Missing) => Ordering::Greater,
            (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Date(a), Date(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            (Bool(a), Bool(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Bool(_) => 1,
            Self::Date(_) => 2,
            Self::Timestamp(_) => 3,
            Self::Text(_) => 4,
        }
    }
}
