//! File status enumeration and history entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use dak_core::types::{FileId, StatusChangeId};

/// Processing status of a tracked file.
///
/// The backend stores status as free text. Values outside the five known
/// states deserialize as [`FileStatus::Unknown`] so one odd record cannot
/// break a whole listing; parsing user input with [`FromStr`] stays strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileStatus {
    /// Waiting for action.
    Pending,
    /// Being worked on.
    InProgress,
    /// Finished without leaving the office.
    Completed,
    /// A received file that has been sent back.
    Returned,
    /// A dispatched file that has left the office.
    Dispatched,
    /// A stored value this client does not recognise. Not a done state.
    Unknown,
}

impl FileStatus {
    /// All statuses in display order.
    pub const ALL: [FileStatus; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Returned,
        Self::Dispatched,
    ];

    /// Return the status as its display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Returned => "Returned",
            Self::Dispatched => "Dispatched",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this status counts as done.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed | Self::Returned | Self::Dispatched)
    }

    /// Status given to a newly created record.
    pub fn initial(needs_return: bool) -> Self {
        if needs_return {
            Self::Pending
        } else {
            Self::Completed
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileStatus {
    type Err = dak_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "returned" => Ok(Self::Returned),
            "dispatched" => Ok(Self::Dispatched),
            _ => Err(dak_core::AppError::validation(format!(
                "Invalid file status: '{s}'. Expected one of: Pending, In Progress, Completed, Returned, Dispatched"
            ))),
        }
    }
}

impl From<String> for FileStatus {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("unknown") {
            return Self::Unknown;
        }
        value.parse().unwrap_or_else(|_| {
            warn!(status = %value, "Unrecognised file status, treating as Unknown");
            Self::Unknown
        })
    }
}

impl From<FileStatus> for String {
    fn from(value: FileStatus) -> Self {
        value.as_str().to_string()
    }
}

/// One entry in a file's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Entry identifier, absent on entries the backend has not stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StatusChangeId>,
    /// The file this entry belongs to, when the backend includes it.
    #[serde(default, alias = "file_id", skip_serializing_if = "Option::is_none")]
    pub file: Option<FileId>,
    /// The status the file moved to.
    pub status: FileStatus,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
    /// Why the change happened.
    #[serde(default, deserialize_with = "crate::wire::empty_as_none")]
    pub reason: Option<String>,
}

impl StatusChange {
    /// A new entry stamped with the current time.
    pub fn now(status: FileStatus, reason: Option<String>) -> Self {
        Self {
            id: Some(StatusChangeId::new()),
            file: None,
            status,
            timestamp: Utc::now(),
            reason,
        }
    }
}

/// Body of a status update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// The new status.
    pub status: FileStatus,
    /// Optional reason stored in history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
