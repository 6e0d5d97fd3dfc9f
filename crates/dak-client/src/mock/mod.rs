//! Local demo backend.
//!
//! [`MockDataClient`] answers every [`DataClient`] call from a persistent
//! key/value store, scoped per signed-in user, after a simulated network
//! delay. New users start with two sample files and the seeded department
//! list.

pub mod seed;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info};

use dak_core::config::mock::MockConfig;
use dak_core::error::AppError;
use dak_core::result::AppResult;
use dak_core::traits::kv_store::KeyValueStore;
use dak_core::types::{EmailThreadId, FileId};
use dak_entity::department::{Department, NewDepartment};
use dak_entity::email::{EmailStatus, EmailThread, SendEmailRequest, SendEmailResponse};
use dak_entity::file::{FileRecord, FileUpdate, NewFile, StatusChange, StatusUpdate};
use dak_entity::user::{AuthTokens, AuthUser, Credentials};

use crate::client::{Attachment, DataClient, INITIAL_CREATION_REASON};
use crate::session::Session;

pub use self::store::{FileKeyValueStore, MemoryKeyValueStore};

/// Scope used when nobody is signed in.
pub const DEFAULT_USER_SCOPE: &str = "default_user";

/// History reason used when a status update carries none.
pub const DEFAULT_STATUS_REASON: &str = "Status updated";

/// Minimum password length the demo backend accepts at registration.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Sender recorded on emails sent while signed out.
const FALLBACK_SENDER: &str = "demo@example.com";

/// Data client backed by a local key/value store.
#[derive(Debug, Clone)]
pub struct MockDataClient {
    store: Arc<dyn KeyValueStore>,
    session: Session,
    config: MockConfig,
    write_lock: Arc<Mutex<()>>,
}

impl MockDataClient {
    /// Creates a demo client over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, session: Session, config: MockConfig) -> Self {
        Self {
            store,
            session,
            config,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Stable user id derived from an email address.
    pub fn user_id_for(email: &str) -> String {
        let slug: String = email
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("user_{slug}")
    }

    async fn pause(&self, millis: u64) {
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    async fn scope(&self) -> String {
        self.session
            .user()
            .await
            .map(|user| user.id)
            .unwrap_or_else(|| DEFAULT_USER_SCOPE.to_string())
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.store.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save<T: Serialize + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).await
    }

    async fn files(&self, scope: &str) -> AppResult<Vec<FileRecord>> {
        let key = files_key(scope);
        if let Some(files) = self.load(&key).await? {
            return Ok(files);
        }
        let files = seed::sample_files();
        self.save(&key, &files).await?;
        info!(scope, count = files.len(), "Seeded demo files");
        Ok(files)
    }

    async fn departments(&self) -> AppResult<Vec<Department>> {
        if let Some(departments) = self.load(DEPARTMENTS_KEY).await? {
            return Ok(departments);
        }
        let departments = seed::sample_departments();
        self.save(DEPARTMENTS_KEY, &departments).await?;
        Ok(departments)
    }

    async fn threads(&self, scope: &str) -> AppResult<Vec<EmailThread>> {
        Ok(self
            .load(&threads_key(scope))
            .await?
            .unwrap_or_default())
    }

    /// Read-modify-write the file list of the current scope.
    async fn with_files<R: Send>(
        &self,
        mutate: impl FnOnce(&mut Vec<FileRecord>) -> AppResult<R> + Send,
    ) -> AppResult<R> {
        let _guard = self.write_lock.lock().await;
        let scope = self.scope().await;
        let mut files = self.files(&scope).await?;
        let result = mutate(&mut files)?;
        self.save(&files_key(&scope), &files).await?;
        Ok(result)
    }

    fn issue_tokens(email: &str) -> AuthTokens {
        let stamp = Utc::now().timestamp_millis();
        AuthTokens {
            access: format!("mock-jwt-token-{stamp}"),
            refresh: format!("mock-refresh-token-{stamp}"),
            user: AuthUser {
                id: Self::user_id_for(email),
                email: email.trim().to_string(),
            },
        }
    }
}

const DEPARTMENTS_KEY: &str = "departments";

fn files_key(scope: &str) -> String {
    format!("files:{scope}")
}

fn threads_key(scope: &str) -> String {
    format!("email_threads:{scope}")
}

fn not_found(id: FileId) -> AppError {
    AppError::not_found(format!("File not found: {id}"))
}

#[async_trait]
impl DataClient for MockDataClient {
    fn backend_name(&self) -> &'static str {
        "mock"
    }

    async fn list_files(&self) -> AppResult<Vec<FileRecord>> {
        self.pause(self.config.delay_ms).await;
        let scope = self.scope().await;
        self.files(&scope).await
    }

    async fn get_file(&self, id: FileId) -> AppResult<FileRecord> {
        self.pause(self.config.delay_ms).await;
        let scope = self.scope().await;
        self.files(&scope)
            .await?
            .into_iter()
            .find(|file| file.id == id)
            .ok_or_else(|| not_found(id))
    }

    async fn create_file(&self, new: NewFile) -> AppResult<FileRecord> {
        self.pause(self.config.delay_ms).await;
        let created = self
            .with_files(move |files| {
                if files.iter().any(|file| file.id == new.id) {
                    return Err(AppError::conflict(format!(
                        "File already exists: {}",
                        new.id
                    )));
                }
                let status = new.status;
                let mut file = FileRecord::from_new(new);
                file.record_status(status, Some(INITIAL_CREATION_REASON.to_string()));
                files.insert(0, file.clone());
                Ok(file)
            })
            .await?;
        info!(file_id = %created.id, file_number = %created.file_number, "File created");
        Ok(created)
    }

    async fn update_file(&self, id: FileId, update: &FileUpdate) -> AppResult<FileRecord> {
        self.pause(self.config.delay_ms).await;
        let update = update.clone();
        self.with_files(move |files| {
            let file = files
                .iter_mut()
                .find(|file| file.id == id)
                .ok_or_else(|| not_found(id))?;
            file.apply_update(&update);
            Ok(file.clone())
        })
        .await
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        self.pause(self.config.delay_ms).await;
        self.with_files(move |files| {
            let before = files.len();
            files.retain(|file| file.id != id);
            if files.len() == before {
                return Err(not_found(id));
            }
            Ok(())
        })
        .await?;
        info!(file_id = %id, "File deleted");
        Ok(())
    }

    async fn update_file_status(
        &self,
        id: FileId,
        update: &StatusUpdate,
    ) -> AppResult<StatusChange> {
        self.pause(self.config.delay_ms).await;
        let update = update.clone();
        self.with_files(move |files| {
            let file = files
                .iter_mut()
                .find(|file| file.id == id)
                .ok_or_else(|| not_found(id))?;
            let reason = update
                .reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STATUS_REASON.to_string());
            Ok(file.record_status(update.status, Some(reason)))
        })
        .await
    }

    async fn upload_attachment(&self, attachment: Attachment) -> AppResult<String> {
        self.pause(self.config.upload_delay_ms).await;
        debug!(file_name = %attachment.file_name, bytes = attachment.len(), "Demo upload");
        Ok(format!("/mock/path/{}", attachment.file_name))
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.pause(self.config.delay_ms).await;
        self.departments().await
    }

    async fn add_department(&self, new: &NewDepartment) -> AppResult<Department> {
        self.pause(self.config.delay_ms).await;
        let name = new.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Department name is required"));
        }

        let _guard = self.write_lock.lock().await;
        let mut departments = self.departments().await?;
        if let Some(existing) = departments
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
        {
            return Ok(existing.clone());
        }

        let department = Department {
            is_custom: new.is_custom,
            ..Department::seeded(name)
        };
        departments.push(department.clone());
        self.save(DEPARTMENTS_KEY, &departments).await?;
        info!(name, "Department added");
        Ok(department)
    }

    async fn list_email_threads(&self, file_id: FileId) -> AppResult<Vec<EmailThread>> {
        self.pause(self.config.delay_ms).await;
        let scope = self.scope().await;
        let mut threads: Vec<EmailThread> = self
            .threads(&scope)
            .await?
            .into_iter()
            .filter(|thread| thread.file == Some(file_id))
            .collect();
        threads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(threads)
    }

    async fn send_email(&self, request: &SendEmailRequest) -> AppResult<SendEmailResponse> {
        self.pause(self.config.email_delay_ms).await;
        if request.recipient_email.trim().is_empty()
            || request.subject.trim().is_empty()
            || request.message_body.trim().is_empty()
        {
            return Err(AppError::validation(
                "recipientEmail, subject and messageBody are required",
            ));
        }

        let _guard = self.write_lock.lock().await;
        let scope = self.scope().await;
        let sender = self
            .session
            .user()
            .await
            .map(|user| user.email)
            .unwrap_or_else(|| FALLBACK_SENDER.to_string());

        let mut threads = self.threads(&scope).await?;
        threads.push(EmailThread {
            id: EmailThreadId::new(),
            file: Some(request.file_id),
            sender_email: sender,
            recipient_email: request.recipient_email.clone(),
            cc_email: request.cc_email.clone(),
            subject: request.subject.clone(),
            message_body: request.message_body.clone(),
            attachment_path: request.file_url.clone(),
            status: EmailStatus::Sent,
            error_message: None,
            created_at: Utc::now(),
        });
        self.save(&threads_key(&scope), &threads).await?;
        info!(file_id = %request.file_id, recipient = %request.recipient_email, "Email sent");

        Ok(SendEmailResponse {
            success: true,
            error: None,
        })
    }

    async fn register(&self, credentials: &Credentials) -> AppResult<AuthTokens> {
        self.pause(self.config.auth_delay_ms).await;
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }
        if !credentials.email.contains('@') {
            return Err(AppError::validation("Please enter a valid email address"));
        }
        if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }
        Ok(Self::issue_tokens(&credentials.email))
    }

    async fn login(&self, credentials: &Credentials) -> AppResult<AuthTokens> {
        self.pause(self.config.auth_delay_ms).await;
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }
        Ok(Self::issue_tokens(&credentials.email))
    }

    async fn current_user(&self) -> AppResult<AuthUser> {
        self.pause(self.config.delay_ms).await;
        if !self.session.is_authenticated().await {
            return Err(AppError::authentication("Not signed in"));
        }
        self.session
            .user()
            .await
            .ok_or_else(|| AppError::authentication("Not signed in"))
    }
}
