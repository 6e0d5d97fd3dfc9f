//! File records: cached store, status lifecycle, numbering and export.

pub mod export;
pub mod lifecycle;
pub mod number;
pub mod store;

pub use self::export::{export_csv, write_csv};
pub use self::lifecycle::{FileAction, LifecycleService, available_actions, check_transition};
pub use self::number::{FileNumberGenerator, next_file_number};
pub use self::store::FileStore;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use dak_client::mock::MemoryKeyValueStore;
    use dak_client::{Attachment, DataClient, MockDataClient, Session};
    use dak_core::config::MockConfig;
    use dak_core::error::AppError;
    use dak_core::result::AppResult;
    use dak_core::types::FileId;
    use dak_entity::department::{Department, NewDepartment};
    use dak_entity::email::{EmailThread, SendEmailRequest, SendEmailResponse};
    use dak_entity::file::{
        FileRecord, FileStatus, FileType, FileUpdate, NewFile, StatusChange, StatusUpdate,
    };
    use dak_entity::user::{AuthTokens, AuthUser, Credentials};

    /// Call counters shared with a [`CountingClient`].
    #[derive(Debug, Clone, Default)]
    pub struct Calls {
        list_files: Arc<AtomicUsize>,
        list_departments: Arc<AtomicUsize>,
        fail_after_create: Arc<AtomicBool>,
    }

    impl Calls {
        pub fn list_files(&self) -> usize {
            self.list_files.load(Ordering::SeqCst)
        }

        pub fn list_departments(&self) -> usize {
            self.list_departments.load(Ordering::SeqCst)
        }

        /// Make the next create store the record and still report an error.
        pub fn fail_after_next_create(&self) {
            self.fail_after_create.store(true, Ordering::SeqCst);
        }
    }

    /// Demo client that counts list reads.
    #[derive(Debug)]
    pub struct CountingClient {
        inner: MockDataClient,
        calls: Calls,
    }

    pub fn counting_client() -> (Arc<dyn DataClient>, Calls) {
        let calls = Calls::default();
        let inner = MockDataClient::new(
            Arc::new(MemoryKeyValueStore::new()),
            Session::new(),
            MockConfig::instant("unused"),
        );
        let client = CountingClient {
            inner,
            calls: calls.clone(),
        };
        (Arc::new(client), calls)
    }

    pub fn new_file(file_type: FileType, number: &str) -> NewFile {
        NewFile {
            id: FileId::new(),
            file_number: number.to_string(),
            title: "Audit Report".to_string(),
            file_type,
            department: "Finance".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
            status: FileStatus::initial(true),
            description: String::new(),
            remarks: String::new(),
            needs_return: true,
            storage_path: None,
        }
    }

    #[async_trait]
    impl DataClient for CountingClient {
        fn backend_name(&self) -> &'static str {
            "counting"
        }

        async fn list_files(&self) -> AppResult<Vec<FileRecord>> {
            self.calls.list_files.fetch_add(1, Ordering::SeqCst);
            self.inner.list_files().await
        }

        async fn get_file(&self, id: FileId) -> AppResult<FileRecord> {
            self.inner.get_file(id).await
        }

        async fn create_file(&self, new: NewFile) -> AppResult<FileRecord> {
            let created = self.inner.create_file(new).await?;
            if self.calls.fail_after_create.swap(false, Ordering::SeqCst) {
                return Err(AppError::external("Backend timed out after create"));
            }
            Ok(created)
        }

        async fn update_file(&self, id: FileId, update: &FileUpdate) -> AppResult<FileRecord> {
            self.inner.update_file(id, update).await
        }

        async fn delete_file(&self, id: FileId) -> AppResult<()> {
            self.inner.delete_file(id).await
        }

        async fn update_file_status(
            &self,
            id: FileId,
            update: &StatusUpdate,
        ) -> AppResult<StatusChange> {
            self.inner.update_file_status(id, update).await
        }

        async fn upload_attachment(&self, attachment: Attachment) -> AppResult<String> {
            self.inner.upload_attachment(attachment).await
        }

        async fn list_departments(&self) -> AppResult<Vec<Department>> {
            self.calls.list_departments.fetch_add(1, Ordering::SeqCst);
            self.inner.list_departments().await
        }

        async fn add_department(&self, new: &NewDepartment) -> AppResult<Department> {
            self.inner.add_department(new).await
        }

        async fn list_email_threads(&self, file_id: FileId) -> AppResult<Vec<EmailThread>> {
            self.inner.list_email_threads(file_id).await
        }

        async fn send_email(&self, request: &SendEmailRequest) -> AppResult<SendEmailResponse> {
            self.inner.send_email(request).await
        }

        async fn register(&self, credentials: &Credentials) -> AppResult<AuthTokens> {
            self.inner.register(credentials).await
        }

        async fn login(&self, credentials: &Credentials) -> AppResult<AuthTokens> {
            self.inner.login(credentials).await
        }

        async fn current_user(&self) -> AppResult<AuthUser> {
            self.inner.current_user().await
        }
    }
}
