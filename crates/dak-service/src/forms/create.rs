//! New file form.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};
use validator::Validate;

use dak_client::Attachment;
use dak_core::error::AppError;
use dak_core::types::FileId;
use dak_entity::file::{FileRecord, FileStatus, FileType, NewFile};

use super::department::DepartmentChoice;
use crate::department::DepartmentService;
use crate::file::FileStore;
use crate::notice::Notice;

/// Fields of the new file form.
#[derive(Debug, Clone, Validate)]
pub struct CreateFileForm {
    /// Direction of the correspondence.
    pub file_type: FileType,
    /// Generated file number.
    #[validate(length(min = 1, message = "Please generate a file number first"))]
    pub file_number: String,
    /// Subject line.
    #[validate(length(min = 1, message = "Please enter a title for the file"))]
    pub title: String,
    /// Owning department.
    pub department: DepartmentChoice,
    /// Calendar date.
    pub date: NaiveDate,
    /// Whether the file is expected to come back.
    pub needs_return: bool,
    pub description: String,
    pub remarks: String,
    /// Optional document to upload.
    pub attachment: Option<Attachment>,
}

impl Default for CreateFileForm {
    fn default() -> Self {
        Self {
            file_type: FileType::default(),
            file_number: String::new(),
            title: String::new(),
            department: DepartmentChoice::default(),
            date: Local::now().date_naive(),
            needs_return: false,
            description: String::new(),
            remarks: String::new(),
            attachment: None,
        }
    }
}

/// A saved file and what the user should be told about it.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    /// The record as stored by the backend.
    pub file: FileRecord,
    /// Success notice, plus a warning when the upload failed.
    pub notices: Vec<Notice>,
}

impl CreateFileForm {
    /// Change the file type, dropping needs-return for internal files.
    pub fn set_file_type(&mut self, file_type: FileType) {
        self.file_type = file_type;
        if !file_type.allows_return() {
            self.needs_return = false;
        }
    }

    /// Check required fields.
    pub fn check(&self) -> Result<(), AppError> {
        let trimmed = Self {
            file_number: self.file_number.trim().to_string(),
            title: self.title.trim().to_string(),
            ..self.clone()
        };
        trimmed.validate()?;
        if self.department.name().is_empty() {
            return Err(AppError::validation("Please select a department"));
        }
        Ok(())
    }

    /// Save the form and reset it.
    ///
    /// A custom department is added first and aborts the submission when
    /// that fails. A failed attachment upload does not: the record is saved
    /// without a storage path and a warning is returned.
    pub async fn submit(
        &mut self,
        files: &FileStore,
        departments: &DepartmentService,
    ) -> Result<CreateOutcome, AppError> {
        self.check()?;

        if let DepartmentChoice::Other(name) = &self.department {
            departments.add_custom(name).await?;
        }

        let id = FileId::new();
        let mut notices = Vec::new();
        let mut storage_path = None;
        if let Some(attachment) = self.attachment.clone() {
            match files.client().upload_attachment(attachment).await {
                Ok(path) => storage_path = Some(path),
                Err(e) => {
                    warn!(file_id = %id, error = %e, "Attachment upload failed");
                    notices.push(Notice::warning(
                        "Warning",
                        "The file metadata was saved, but the file upload failed. \
                         You can try to upload the file again later.",
                    ));
                }
            }
        }

        let needs_return = self.needs_return && self.file_type.allows_return();
        let new = NewFile {
            id,
            file_number: self.file_number.trim().to_string(),
            title: self.title.trim().to_string(),
            file_type: self.file_type,
            department: self.department.name().to_string(),
            date: self.date,
            status: FileStatus::initial(needs_return),
            description: self.description.clone(),
            remarks: self.remarks.clone(),
            needs_return,
            storage_path,
        };

        let file = files.create(new).await?;
        info!(file_id = %file.id, file_number = %file.file_number, "File created");

        notices.insert(
            0,
            Notice::success(
                "File uploaded successfully",
                "Your file has been processed and saved.",
            ),
        );
        *self = Self::default();
        Ok(CreateOutcome { file, notices })
    }
}
