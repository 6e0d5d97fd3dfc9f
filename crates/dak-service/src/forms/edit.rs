//! Edit form for an existing file.

use chrono::NaiveDate;
use validator::Validate;

use dak_core::error::AppError;
use dak_core::types::FileId;
use dak_entity::file::{FileRecord, FileType, FileUpdate};

use crate::file::FileStore;

/// Editable fields of a file, prefilled from the stored record.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct EditFileForm {
    id: FileId,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub file_type: FileType,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    pub date: NaiveDate,
    pub description: String,
    pub remarks: String,
    pub needs_return: bool,
}

impl EditFileForm {
    /// Prefill from `file`.
    pub fn from_record(file: &FileRecord) -> Self {
        Self {
            id: file.id,
            title: file.title.clone(),
            file_type: file.file_type,
            department: file.department.clone(),
            date: file.date,
            description: file.description.clone(),
            remarks: file.remarks.clone(),
            needs_return: file.needs_return,
        }
    }

    /// The file being edited.
    pub fn id(&self) -> FileId {
        self.id
    }

    /// Build the PATCH body.
    pub fn to_update(&self) -> Result<FileUpdate, AppError> {
        let form = Self {
            title: self.title.trim().to_string(),
            department: self.department.trim().to_string(),
            ..self.clone()
        };
        form.validate()?;

        Ok(FileUpdate {
            title: Some(form.title),
            file_type: Some(form.file_type),
            department: Some(form.department),
            date: Some(form.date),
            description: Some(form.description),
            remarks: Some(form.remarks),
            needs_return: Some(form.needs_return && form.file_type.allows_return()),
        })
    }

    /// Send the edit.
    pub async fn submit(&self, files: &FileStore) -> Result<FileRecord, AppError> {
        let update = self.to_update()?;
        files.update(self.id, &update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::test_support::new_file;

    #[test]
    fn test_update_carries_all_fields() {
        let file = FileRecord::from_new(new_file(FileType::Received, "FT/REC/001"));
        let mut form = EditFileForm::from_record(&file);
        form.title = " Revised Audit ".into();
        form.file_type = FileType::Internal;

        let update = form.to_update().unwrap();
        assert_eq!(update.title.as_deref(), Some("Revised Audit"));
        assert_eq!(update.needs_return, Some(false));
        assert_eq!(update.date, Some(file.date));

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["date"], "2024-03-01");
        assert_eq!(body["type"], "internal");
    }

    #[test]
    fn test_blank_title_rejected() {
        let file = FileRecord::from_new(new_file(FileType::Received, "FT/REC/001"));
        let mut form = EditFileForm::from_record(&file);
        form.title = "  ".into();
        assert!(form.to_update().unwrap_err().is_validation());
    }
}
