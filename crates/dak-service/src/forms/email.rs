//! Email composer for a file.

use tracing::debug;
use validator::Validate;

use dak_core::config::EmailConfig;
use dak_core::error::AppError;
use dak_core::types::FileId;
use dak_entity::email::{EmailThread, SendEmailRequest};

use crate::email::EmailService;
use crate::file::FileStore;
use crate::notice::Notice;

/// Compose form for an email about one file.
#[derive(Debug, Clone, Validate)]
pub struct EmailComposer {
    file_id: FileId,
    default_subject: String,
    #[validate(email(message = "Please enter a valid recipient email"))]
    pub recipient: String,
    pub cc: String,
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub body: String,
}

impl EmailComposer {
    /// A blank composer for the file titled `file_title`.
    pub fn new(file_id: FileId, file_title: &str, config: &EmailConfig) -> Self {
        let default_subject = format!("{}{file_title}", config.subject_prefix);
        Self {
            file_id,
            subject: default_subject.clone(),
            default_subject,
            recipient: String::new(),
            cc: config.default_cc.clone(),
            body: String::new(),
        }
    }

    /// Check required fields.
    pub fn check(&self) -> Result<(), AppError> {
        if self.recipient.trim().is_empty() {
            return Err(AppError::validation("Please fill in all required fields"));
        }
        Self {
            recipient: self.recipient.trim().to_string(),
            subject: self.subject.trim().to_string(),
            body: self.body.trim().to_string(),
            ..self.clone()
        }
        .validate()?;
        Ok(())
    }

    /// Send the email, then return the refreshed thread list.
    ///
    /// The attachment link and name come from the file's storage path.
    /// Recipient, body and subject are reset afterwards; cc is kept.
    pub async fn send(
        &mut self,
        files: &FileStore,
        email: &EmailService,
    ) -> Result<(Vec<EmailThread>, Notice), AppError> {
        self.check()?;

        let file = files.get(self.file_id).await?;
        let request = SendEmailRequest {
            recipient_email: self.recipient.trim().to_string(),
            cc_email: self.cc.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message_body: self.body.clone(),
            file_url: file.storage_path.clone(),
            file_name: file.attachment_name().map(str::to_string),
            file_id: self.file_id,
        };
        debug!(file_id = %self.file_id, attachment = ?request.file_name, "Sending email");
        email.send(&request).await?;

        let threads = email.threads(self.file_id).await?;
        self.recipient.clear();
        self.body.clear();
        self.subject = self.default_subject.clone();
        Ok((threads, Notice::success("Success", "Email sent successfully")))
    }
}
