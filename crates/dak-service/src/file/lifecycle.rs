//! Status transitions offered on a file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use dak_core::error::AppError;
use dak_core::types::FileId;
use dak_entity::file::{FileRecord, FileStatus, FileType, StatusUpdate};

use super::store::FileStore;

/// A user-initiated status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    /// Send a dispatched-type file out.
    MarkDispatched,
    /// Send a received file back.
    MarkReturned,
    /// Reopen a finished file.
    Undo,
}

impl FileAction {
    /// Status the action moves the file to.
    pub fn target_status(&self) -> FileStatus {
        match self {
            Self::MarkDispatched => FileStatus::Dispatched,
            Self::MarkReturned => FileStatus::Returned,
            Self::Undo => FileStatus::Pending,
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MarkDispatched => "Mark as Dispatched",
            Self::MarkReturned => "Mark as Returned",
            Self::Undo => "Undo",
        }
    }

    /// Return the action as its command string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarkDispatched => "dispatch",
            Self::MarkReturned => "return",
            Self::Undo => "undo",
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dispatch" | "mark_dispatched" => Ok(Self::MarkDispatched),
            "return" | "mark_returned" => Ok(Self::MarkReturned),
            "undo" => Ok(Self::Undo),
            _ => Err(AppError::validation(format!("Invalid file action: '{s}'"))),
        }
    }
}

/// Actions a UI may offer for `file`.
pub fn available_actions(file: &FileRecord) -> Vec<FileAction> {
    if file.is_completed() {
        return vec![FileAction::Undo];
    }
    match file.file_type {
        FileType::Dispatched => vec![FileAction::MarkDispatched],
        FileType::Received => vec![FileAction::MarkReturned],
        FileType::Internal => Vec::new(),
    }
}

/// Check `action` against the current state of `file` and build the update.
///
/// Nothing is sent to the backend when this fails.
pub fn check_transition(
    file: &FileRecord,
    action: FileAction,
    reason: Option<&str>,
) -> Result<StatusUpdate, AppError> {
    let reason = reason.map(str::trim).filter(|r| !r.is_empty());

    match action {
        FileAction::Undo => {
            if !file.is_completed() {
                return Err(AppError::validation(format!(
                    "File '{}' is {} and has nothing to undo",
                    file.file_number, file.status
                )));
            }
            let Some(reason) = reason else {
                return Err(AppError::validation(
                    "Please provide a reason for undoing the status",
                ));
            };
            Ok(StatusUpdate {
                status: FileStatus::Pending,
                reason: Some(reason.to_string()),
            })
        }
        FileAction::MarkDispatched | FileAction::MarkReturned => {
            if !available_actions(file).contains(&action) {
                return Err(AppError::validation(format!(
                    "Cannot {} file '{}': it is a {} file with status {}",
                    action.label().to_lowercase(),
                    file.file_number,
                    file.file_type,
                    file.status
                )));
            }
            Ok(StatusUpdate {
                status: action.target_status(),
                reason: reason.map(str::to_string),
            })
        }
    }
}

/// Applies lifecycle actions through the file store.
#[derive(Debug, Clone)]
pub struct LifecycleService {
    store: FileStore,
}

impl LifecycleService {
    /// Creates a new lifecycle service.
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Apply `action` to a file and return the refreshed record.
    pub async fn apply(
        &self,
        id: FileId,
        action: FileAction,
        reason: Option<&str>,
    ) -> Result<FileRecord, AppError> {
        let file = self.store.get(id).await?;
        let update = check_transition(&file, action, reason)?;

        self.store
            .update_status(id, update.status, update.reason)
            .await?;

        info!(file_id = %id, action = %action, "Lifecycle action applied");
        self.store.get(id).await
    }

    /// Mark a dispatched-type file as dispatched.
    pub async fn dispatch(&self, id: FileId) -> Result<FileRecord, AppError> {
        self.apply(id, FileAction::MarkDispatched, None).await
    }

    /// Mark a received file as returned.
    pub async fn mark_returned(&self, id: FileId) -> Result<FileRecord, AppError> {
        self.apply(id, FileAction::MarkReturned, None).await
    }

    /// Reopen a finished file.
    pub async fn undo(&self, id: FileId, reason: &str) -> Result<FileRecord, AppError> {
        self.apply(id, FileAction::Undo, Some(reason)).await
    }

    /// The underlying file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::file::test_support::{counting_client, new_file};
    use dak_cache::CacheManager;
    use dak_core::config::CacheConfig;
    use dak_core::error::ErrorKind;

    fn record(file_type: FileType, status: FileStatus) -> FileRecord {
        let mut file = FileRecord::from_new(new_file(file_type, "FT/X/001"));
        file.status = status;
        file
    }

    fn service() -> LifecycleService {
        let (client, _) = counting_client();
        let cache = Arc::new(CacheManager::new(&CacheConfig::default()).unwrap());
        LifecycleService::new(FileStore::new(client, cache, Duration::from_secs(60)))
    }

    #[test]
    fn test_available_actions() {
        assert_eq!(
            available_actions(&record(FileType::Dispatched, FileStatus::Pending)),
            vec![FileAction::MarkDispatched]
        );
        assert_eq!(
            available_actions(&record(FileType::Received, FileStatus::InProgress)),
            vec![FileAction::MarkReturned]
        );
        assert!(available_actions(&record(FileType::Internal, FileStatus::Pending)).is_empty());
        for status in [
            FileStatus::Completed,
            FileStatus::Returned,
            FileStatus::Dispatched,
        ] {
            assert_eq!(
                available_actions(&record(FileType::Internal, status)),
                vec![FileAction::Undo]
            );
        }
    }

    #[test]
    fn test_unknown_status_is_not_done() {
        let file = record(FileType::Received, FileStatus::Unknown);
        assert_eq!(available_actions(&file), vec![FileAction::MarkReturned]);
        assert!(check_transition(&file, FileAction::Undo, Some("typo")).is_err());
    }

    #[test]
    fn test_undo_requires_reason() {
        let file = record(FileType::Dispatched, FileStatus::Dispatched);
        for reason in [None, Some(""), Some("   ")] {
            let err = check_transition(&file, FileAction::Undo, reason).unwrap_err();
            assert!(err.is_validation());
        }

        let update = check_transition(&file, FileAction::Undo, Some(" sent in error ")).unwrap();
        assert_eq!(update.status, FileStatus::Pending);
        assert_eq!(update.reason.as_deref(), Some("sent in error"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let file = record(FileType::Received, FileStatus::Pending);
        let err = check_transition(&file, FileAction::MarkDispatched, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let internal = record(FileType::Internal, FileStatus::Pending);
        assert!(check_transition(&internal, FileAction::MarkReturned, None).is_err());
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("Dispatch".parse::<FileAction>().unwrap(), FileAction::MarkDispatched);
        assert_eq!("return".parse::<FileAction>().unwrap(), FileAction::MarkReturned);
        assert!("archive".parse::<FileAction>().is_err());
    }

    #[tokio::test]
    async fn test_dispatch_undo_redispatch() {
        let lifecycle = service();
        let mut new = new_file(FileType::Dispatched, "FT/DISP/001");
        new.needs_return = false;
        new.status = FileStatus::Pending;
        let created = lifecycle.store().create(new).await.unwrap();
        let before = created.status_history.len();

        lifecycle.dispatch(created.id).await.unwrap();
        lifecycle.undo(created.id, "Wrong recipient").await.unwrap();
        let file = lifecycle.dispatch(created.id).await.unwrap();

        let added: Vec<_> = file.status_history[before..]
            .iter()
            .map(|c| (c.status, c.reason.clone()))
            .collect();
        assert_eq!(
            added,
            vec![
                (FileStatus::Dispatched, Some("Status updated".to_string())),
                (FileStatus::Pending, Some("Wrong recipient".to_string())),
                (FileStatus::Dispatched, Some("Status updated".to_string())),
            ]
        );
        assert_eq!(file.status, FileStatus::Dispatched);
    }

    #[tokio::test]
    async fn test_blank_undo_leaves_status() {
        let lifecycle = service();
        let created = lifecycle
            .store()
            .create(new_file(FileType::Received, "FT/REC/001"))
            .await
            .unwrap();
        lifecycle.mark_returned(created.id).await.unwrap();

        let err = lifecycle.undo(created.id, "  ").await.unwrap_err();
        assert!(err.is_validation());

        let file = lifecycle.store().get(created.id).await.unwrap();
        assert_eq!(file.status, FileStatus::Returned);
    }
}
