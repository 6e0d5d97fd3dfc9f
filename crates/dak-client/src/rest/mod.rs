//! HTTP client for the DAK REST backend.
//!
//! Provides [`RestDataClient`] which builds URLs under the configured API
//! prefix, attaches the session's bearer token, and normalizes response
//! bodies and error payloads.

pub mod response;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use tracing::{debug, info, warn};

use dak_core::config::backend::BackendConfig;
use dak_core::error::{AppError, ErrorKind};
use dak_core::result::AppResult;
use dak_core::types::FileId;
use dak_entity::department::{Department, NewDepartment};
use dak_entity::email::{EmailThread, SendEmailRequest, SendEmailResponse};
use dak_entity::file::{FileRecord, FileUpdate, NewFile, StatusChange, StatusUpdate};
use dak_entity::user::{AuthTokens, AuthUser, Credentials};

use crate::client::{Attachment, DataClient, INITIAL_CREATION_REASON};
use crate::session::Session;

use self::response::{ResponseBody, error_for_status};

/// Response of the attachment upload endpoint.
#[derive(Debug, serde::Deserialize)]
struct UploadResponse {
    storage_path: String,
}

/// Data client backed by the REST API.
#[derive(Debug, Clone)]
pub struct RestDataClient {
    http: reqwest::Client,
    api_base: String,
    session: Session,
}

impl RestDataClient {
    /// Creates a client for the backend described by `config`.
    pub fn new(config: &BackendConfig, session: Session) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            api_base: api_base(&config.base_url, &config.api_prefix),
            session,
        })
    }

    /// Full URL for an API path such as `/files/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> AppResult<ResponseBody> {
        let response = builder.send().await.map_err(|e| {
            let kind = if e.is_connect() || e.is_timeout() {
                ErrorKind::ServiceUnavailable
            } else {
                ErrorKind::ExternalService
            };
            AppError::with_source(kind, format!("HTTP request failed: {e}"), e)
        })?;

        let status = response.status();
        let url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let raw = response.text().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read response body: {e}"),
                e,
            )
        })?;
        debug!(status = %status, url = %url, "Backend response received");

        if !status.is_success() {
            return Err(error_for_status(status, &raw));
        }
        ResponseBody::from_parts(content_type.as_deref(), raw)
    }

    async fn get(&self, path: &str) -> AppResult<ResponseBody> {
        let builder = self.request(Method::GET, path).await;
        self.execute(builder).await
    }

    async fn send_json<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> AppResult<ResponseBody> {
        let builder = self.request(method, path).await.json(body);
        self.execute(builder).await
    }
}

#[async_trait]
impl DataClient for RestDataClient {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    async fn list_files(&self) -> AppResult<Vec<FileRecord>> {
        self.get("/files/").await?.into_json()
    }

    async fn get_file(&self, id: FileId) -> AppResult<FileRecord> {
        self.get(&format!("/files/{id}/")).await?.into_json()
    }

    async fn create_file(&self, new: NewFile) -> AppResult<FileRecord> {
        let initial_status = new.status;
        let created: FileRecord = self
            .send_json(Method::POST, "/files/", &new)
            .await?
            .into_json()?;

        let initial = StatusUpdate {
            status: initial_status,
            reason: Some(INITIAL_CREATION_REASON.to_string()),
        };
        if let Err(e) = self.update_file_status(created.id, &initial).await {
            // A record without its first history entry is removed again.
            warn!(file_id = %created.id, error = %e, "Initial status failed, rolling back file");
            if let Err(rollback) = self.delete_file(created.id).await {
                warn!(file_id = %created.id, error = %rollback, "Rollback of new file failed");
            }
            return Err(e);
        }

        info!(file_id = %created.id, file_number = %created.file_number, "File created");
        self.get_file(created.id).await
    }

    async fn update_file(&self, id: FileId, update: &FileUpdate) -> AppResult<FileRecord> {
        self.send_json(Method::PATCH, &format!("/files/{id}/"), update)
            .await?
            .into_json()
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let builder = self.request(Method::DELETE, &format!("/files/{id}/")).await;
        self.execute(builder).await?;
        Ok(())
    }

    async fn update_file_status(
        &self,
        id: FileId,
        update: &StatusUpdate,
    ) -> AppResult<StatusChange> {
        self.send_json(
            Method::POST,
            &format!("/files/{id}/update_status/"),
            update,
        )
        .await?
        .into_json()
    }

    async fn upload_attachment(&self, attachment: Attachment) -> AppResult<String> {
        let part = reqwest::multipart::Part::bytes(attachment.content.to_vec())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.content_type)
            .map_err(|e| {
                AppError::validation(format!(
                    "Invalid content type '{}': {e}",
                    attachment.content_type
                ))
            })?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let builder = self
            .request(Method::POST, "/files/upload/")
            .await
            .multipart(form);
        let uploaded: UploadResponse = self.execute(builder).await?.into_json()?;
        Ok(uploaded.storage_path)
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.get("/departments/").await?.into_json()
    }

    async fn add_department(&self, new: &NewDepartment) -> AppResult<Department> {
        self.send_json(Method::POST, "/departments/", new)
            .await?
            .into_json()
    }

    async fn list_email_threads(&self, file_id: FileId) -> AppResult<Vec<EmailThread>> {
        let threads: Vec<EmailThread> = self
            .get(&format!("/email_threads/?file={file_id}"))
            .await?
            .into_json()?;
        let mut threads: Vec<EmailThread> = threads
            .into_iter()
            .filter(|thread| thread.file == Some(file_id))
            .collect();
        threads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(threads)
    }

    async fn send_email(&self, request: &SendEmailRequest) -> AppResult<SendEmailResponse> {
        match self.send_json(Method::POST, "/send-email/", request).await? {
            ResponseBody::Empty => Ok(SendEmailResponse {
                success: true,
                error: None,
            }),
            body => body.into_json(),
        }
    }

    async fn register(&self, credentials: &Credentials) -> AppResult<AuthTokens> {
        self.send_json(Method::POST, "/auth/register/", credentials)
            .await?
            .into_json()
    }

    async fn login(&self, credentials: &Credentials) -> AppResult<AuthTokens> {
        self.send_json(Method::POST, "/auth/login/", credentials)
            .await?
            .into_json()
    }

    async fn current_user(&self) -> AppResult<AuthUser> {
        if !self.session.is_authenticated().await {
            return Err(AppError::authentication("Not signed in"));
        }
        self.get("/auth/me/").await?.into_json()
    }
}

fn api_base(base_url: &str, api_prefix: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let prefix = api_prefix.trim_matches('/');
    if prefix.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{prefix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dak_core::types::StatusChangeId;
    use dak_entity::file::{FileStatus, FileType};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer, session: Session) -> RestDataClient {
        let config = BackendConfig {
            base_url: format!("{}/", server.uri()),
            ..BackendConfig::default()
        };
        RestDataClient::new(&config, session).expect("client")
    }

    fn file_json(id: FileId, status: &str, history: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "file_number": "FT/REC/001",
            "title": "Audit Report",
            "type": "received",
            "department": "Finance",
            "date": "2026-10-17",
            "status": status,
            "description": null,
            "remarks": null,
            "needs_return": true,
            "storage_path": null,
            "status_history": history
        })
    }

    #[test]
    fn test_api_base_joins_slashes() {
        assert_eq!(api_base("http://h:8000/", "/api/"), "http://h:8000/api");
        assert_eq!(api_base("http://h:8000", "api"), "http://h:8000/api");
        assert_eq!(api_base("http://h:8000", ""), "http://h:8000");
    }

    #[tokio::test]
    async fn test_list_files_with_bearer() {
        let server = MockServer::start().await;
        let session = Session::from_state(crate::session::SessionState {
            access_token: Some("tok-123".into()),
            refresh_token: None,
            user: None,
        });
        let id = FileId::new();

        Mock::given(method("GET"))
            .and(path("/api/files/"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([file_json(id, "Pending", serde_json::json!([]))])),
            )
            .mount(&server)
            .await;

        let client = test_client(&server, session);
        let files = client.list_files().await.expect("list");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id, id);
        assert_eq!(files[0].file_type, FileType::Received);
    }

    #[tokio::test]
    async fn test_list_files_tolerates_unrecognised_status() {
        let server = MockServer::start().await;
        let known = FileId::new();
        let odd = FileId::new();

        Mock::given(method("GET"))
            .and(path("/api/files/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                file_json(known, "Returned", serde_json::json!([])),
                file_json(
                    odd,
                    "Archived",
                    serde_json::json!([{
                        "status": "Archived",
                        "reason": "Moved to records room",
                        "timestamp": "2026-10-17T09:00:00Z"
                    }])
                ),
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        let files = client.list_files().await.expect("list");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].status, FileStatus::Returned);
        assert_eq!(files[1].status, FileStatus::Unknown);
        assert_eq!(files[1].status_history[0].status, FileStatus::Unknown);
    }

    #[tokio::test]
    async fn test_create_file_rolls_back_when_initial_status_fails() {
        let server = MockServer::start().await;
        let id = FileId::new();

        Mock::given(method("POST"))
            .and(path("/api/files/"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(file_json(id, "Pending", serde_json::json!([]))),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/api/files/{id}/update_status/")))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "History write failed"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(format!("/api/files/{id}/")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        let err = client
            .create_file(NewFile {
                id: FileId::new(),
                file_number: "FT/REC/001".into(),
                title: "Audit Report".into(),
                file_type: FileType::Received,
                department: "Finance".into(),
                date: chrono::NaiveDate::from_ymd_opt(2026, 10, 17).expect("date"),
                status: FileStatus::Pending,
                description: String::new(),
                remarks: String::new(),
                needs_return: true,
                storage_path: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert_eq!(err.message, "History write failed");
    }

    #[tokio::test]
    async fn test_create_file_records_initial_status() {
        let server = MockServer::start().await;
        let id = FileId::new();

        Mock::given(method("POST"))
            .and(path("/api/files/"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(file_json(id, "Pending", serde_json::json!([]))),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/api/files/{id}/update_status/")))
            .and(body_json(serde_json::json!({
                "status": "Pending",
                "reason": "Initial creation"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": StatusChangeId::new(),
                "file": id,
                "status": "Pending",
                "reason": "Initial creation",
                "timestamp": "2026-10-17T09:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/api/files/{id}/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(file_json(
                id,
                "Pending",
                serde_json::json!([{
                    "status": "Pending",
                    "reason": "Initial creation",
                    "timestamp": "2026-10-17T09:00:00Z"
                }]),
            )))
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        let created = client
            .create_file(NewFile {
                id: FileId::new(),
                file_number: "FT/REC/001".into(),
                title: "Audit Report".into(),
                file_type: FileType::Received,
                department: "Finance".into(),
                date: chrono::NaiveDate::from_ymd_opt(2026, 10, 17).expect("date"),
                status: FileStatus::Pending,
                description: String::new(),
                remarks: String::new(),
                needs_return: true,
                storage_path: None,
            })
            .await
            .expect("create");

        assert_eq!(created.status_history.len(), 1);
        assert_eq!(
            created.status_history[0].reason.as_deref(),
            Some(INITIAL_CREATION_REASON)
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_detail() {
        let server = MockServer::start().await;
        let id = FileId::new();

        Mock::given(method("GET"))
            .and(path(format!("/api/files/{id}/")))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "No File matches the given query."})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        let err = client.get_file(id).await.expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "No File matches the given query.");
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let server = MockServer::start().await;
        let id = FileId::new();

        Mock::given(method("DELETE"))
            .and(path(format!("/api/files/{id}/")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        client.delete_file(id).await.expect("delete");
    }

    #[tokio::test]
    async fn test_login_parses_flat_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login/"))
            .and(body_json(serde_json::json!({
                "email": "clerk@example.com",
                "password": "correct horse"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 3,
                "email": "clerk@example.com",
                "access": "jwt-access",
                "refresh": "jwt-refresh"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        let tokens = client
            .login(&Credentials::new("clerk@example.com", "correct horse"))
            .await
            .expect("login");
        assert_eq!(tokens.user.id, "3");
        assert_eq!(tokens.access, "jwt-access");
    }

    #[tokio::test]
    async fn test_bad_credentials_are_authentication_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"detail": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        let err = client
            .login(&Credentials::new("clerk@example.com", "wrong"))
            .await
            .expect_err("rejected");
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_current_user_requires_token() {
        let server = MockServer::start().await;
        let client = test_client(&server, Session::new());
        let err = client.current_user().await.expect_err("signed out");
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_email_threads_filtered_to_file() {
        let server = MockServer::start().await;
        let id = FileId::new();
        let other = FileId::new();
        let thread = |file: Option<FileId>, at: &str| {
            serde_json::json!({
                "id": dak_core::types::EmailThreadId::new(),
                "file": file,
                "sender_email": "noreply@example.com",
                "recipient_email": "clerk@example.com",
                "cc_email": "",
                "subject": "Regarding File: Audit Report",
                "message_body": "Hello",
                "attachment_path": "",
                "status": "sent",
                "error_message": null,
                "created_at": at
            })
        };

        Mock::given(method("GET"))
            .and(path("/api/email_threads/"))
            .and(query_param("file", id.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                thread(Some(id), "2026-10-16T09:00:00Z"),
                thread(Some(other), "2026-10-16T10:00:00Z"),
                thread(Some(id), "2026-10-17T09:00:00Z"),
                thread(None, "2026-10-17T10:00:00Z"),
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        let threads = client.list_email_threads(id).await.expect("threads");
        assert_eq!(threads.len(), 2);
        assert!(threads[0].created_at > threads[1].created_at);
    }

    #[tokio::test]
    async fn test_upload_returns_storage_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/files/upload/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"storage_path": "uploads/letter.pdf"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        let stored = client
            .upload_attachment(Attachment::new("letter.pdf", b"%PDF-1.7".to_vec()))
            .await
            .expect("upload");
        assert_eq!(stored, "uploads/letter.pdf");
    }

    #[tokio::test]
    async fn test_send_email_failure_surfaces_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/send-email/"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "success": false,
                "error": "SMTP connection refused"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, Session::new());
        let err = client
            .send_email(&SendEmailRequest {
                recipient_email: "clerk@example.com".into(),
                cc_email: String::new(),
                subject: "Hi".into(),
                message_body: "Body".into(),
                file_url: None,
                file_name: None,
                file_id: FileId::new(),
            })
            .await
            .expect_err("500");
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert_eq!(err.message, "SMTP connection refused");
    }
}
