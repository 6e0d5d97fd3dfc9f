//! The data client trait shared by every backend.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

use dak_core::error::AppError;
use dak_core::result::AppResult;
use dak_core::types::FileId;
use dak_entity::department::{Department, NewDepartment};
use dak_entity::email::{EmailThread, SendEmailRequest, SendEmailResponse};
use dak_entity::file::{FileRecord, FileUpdate, NewFile, StatusChange, StatusUpdate};
use dak_entity::user::{AuthTokens, AuthUser, Credentials};

/// History reason recorded when a file is created.
pub const INITIAL_CREATION_REASON: &str = "Initial creation";

/// Every call the application makes against its data backend.
///
/// Implementations are interchangeable: services hold an
/// `Arc<dyn DataClient>` and never know which backend answers.
#[async_trait]
pub trait DataClient: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name for logs and `whoami`.
    fn backend_name(&self) -> &'static str;

    // ── Files ──────────────────────────────────────────────

    /// All files with their history embedded, newest first.
    async fn list_files(&self) -> AppResult<Vec<FileRecord>>;

    /// One file by ID.
    async fn get_file(&self, id: FileId) -> AppResult<FileRecord>;

    /// Create a file and record its initial status in history.
    async fn create_file(&self, new: NewFile) -> AppResult<FileRecord>;

    /// Apply a whole-record edit.
    async fn update_file(&self, id: FileId, update: &FileUpdate) -> AppResult<FileRecord>;

    /// Delete a file together with its history.
    async fn delete_file(&self, id: FileId) -> AppResult<()>;

    /// Set the status of a file and append one history entry.
    async fn update_file_status(&self, id: FileId, update: &StatusUpdate)
    -> AppResult<StatusChange>;

    /// Upload an attachment and return its storage path.
    async fn upload_attachment(&self, attachment: Attachment) -> AppResult<String>;

    // ── Departments ────────────────────────────────────────

    /// All departments.
    async fn list_departments(&self) -> AppResult<Vec<Department>>;

    /// Add a department.
    async fn add_department(&self, new: &NewDepartment) -> AppResult<Department>;

    // ── Email ──────────────────────────────────────────────

    /// Emails logged for a file, newest first.
    async fn list_email_threads(&self, file_id: FileId) -> AppResult<Vec<EmailThread>>;

    /// Send an email about a file.
    async fn send_email(&self, request: &SendEmailRequest) -> AppResult<SendEmailResponse>;

    // ── Auth ───────────────────────────────────────────────

    /// Create an account and sign in.
    async fn register(&self, credentials: &Credentials) -> AppResult<AuthTokens>;

    /// Sign in.
    async fn login(&self, credentials: &Credentials) -> AppResult<AuthTokens>;

    /// The user the current session belongs to.
    async fn current_user(&self) -> AppResult<AuthUser>;
}

/// A file attachment ready to upload.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name sent to the backend.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    pub content: Bytes,
}

impl Attachment {
    /// Build an attachment, guessing the MIME type from the name.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            content: content.into(),
        }
    }

    /// Read an attachment from disk.
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                AppError::validation(format!("Not a file path: '{}'", path.display()))
            })?
            .to_string();
        let content = tokio::fs::read(path).await.map_err(|e| {
            AppError::storage(format!("Failed to read '{}': {e}", path.display()))
        })?;
        Ok(Self::new(file_name, content))
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the attachment has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
