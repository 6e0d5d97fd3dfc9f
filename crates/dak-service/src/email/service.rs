//! Email threads and sending.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use dak_cache::CacheManager;
use dak_cache::keys;
use dak_client::DataClient;
use dak_core::error::AppError;
use dak_core::traits::cache::CacheProvider;
use dak_core::types::FileId;
use dak_entity::email::{EmailThread, SendEmailRequest, SendEmailResponse};

/// Reads and sends emails about files.
#[derive(Debug, Clone)]
pub struct EmailService {
    client: Arc<dyn DataClient>,
    cache: Arc<CacheManager>,
    ttl: Duration,
}

impl EmailService {
    /// Creates a new email service.
    pub fn new(client: Arc<dyn DataClient>, cache: Arc<CacheManager>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    /// Emails logged for a file, newest first.
    pub async fn threads(&self, file_id: FileId) -> Result<Vec<EmailThread>, AppError> {
        let key = keys::email_threads(file_id.into_uuid());
        if let Some(threads) = self.cache.get_json::<Vec<EmailThread>>(&key).await? {
            return Ok(threads);
        }

        let threads = self.client.list_email_threads(file_id).await?;
        self.cache.set_json(&key, &threads, self.ttl).await?;
        Ok(threads)
    }

    /// Send an email about a file.
    ///
    /// A response without `success` is reported as an external service error.
    pub async fn send(&self, request: &SendEmailRequest) -> Result<SendEmailResponse, AppError> {
        let response = self.client.send_email(request).await?;
        self.cache
            .delete(&keys::email_threads(request.file_id.into_uuid()))
            .await?;

        if !response.success {
            let reason = response
                .error
                .clone()
                .unwrap_or_else(|| "Failed to send email".to_string());
            return Err(AppError::external(reason));
        }

        info!(
            file_id = %request.file_id,
            recipient = %request.recipient_email,
            "Email sent"
        );
        Ok(response)
    }
}
