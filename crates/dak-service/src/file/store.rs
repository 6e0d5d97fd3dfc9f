//! Cached access to file records and their history.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use dak_cache::CacheManager;
use dak_cache::keys;
use dak_client::DataClient;
use dak_core::error::AppError;
use dak_core::traits::cache::CacheProvider;
use dak_core::types::FileId;
use dak_entity::file::{FileRecord, FileStatus, FileUpdate, NewFile, StatusChange, StatusUpdate};

/// Query cache over the file endpoints of the data client.
///
/// Reads are served from the cache while fresh. Every successful mutation
/// drops all cached file entries so the next read re-fetches; a failed
/// mutation leaves the cache untouched.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Backend client.
    client: Arc<dyn DataClient>,
    /// Query cache.
    cache: Arc<CacheManager>,
    /// Lifetime of cached reads.
    ttl: Duration,
}

impl FileStore {
    /// Creates a new file store.
    pub fn new(client: Arc<dyn DataClient>, cache: Arc<CacheManager>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    /// All files with embedded history.
    pub async fn list(&self) -> Result<Vec<FileRecord>, AppError> {
        let key = keys::file_list();
        if let Some(files) = self.cache.get_json::<Vec<FileRecord>>(&key).await? {
            debug!(count = files.len(), "File list served from cache");
            return Ok(files);
        }

        let files = self.client.list_files().await?;
        self.cache.set_json(&key, &files, self.ttl).await?;
        debug!(count = files.len(), "File list fetched");
        Ok(files)
    }

    /// One file by ID.
    pub async fn get(&self, id: FileId) -> Result<FileRecord, AppError> {
        let key = keys::file_by_id(id.into_uuid());
        if let Some(file) = self.cache.get_json::<FileRecord>(&key).await? {
            return Ok(file);
        }

        let file = self.client.get_file(id).await?;
        self.cache.set_json(&key, &file, self.ttl).await?;
        Ok(file)
    }

    /// Move a file to `status`, appending one history entry.
    pub async fn update_status(
        &self,
        id: FileId,
        status: FileStatus,
        reason: Option<String>,
    ) -> Result<StatusChange, AppError> {
        let update = StatusUpdate {
            status,
            reason: reason.filter(|r| !r.trim().is_empty()),
        };
        let change = self.client.update_file_status(id, &update).await?;
        self.invalidate().await?;
        info!(file_id = %id, status = %status, "File status updated");
        Ok(change)
    }

    /// Create a file.
    pub async fn create(&self, new: NewFile) -> Result<FileRecord, AppError> {
        let result = self.client.create_file(new).await;
        // A failed create may still have touched the backend.
        self.invalidate().await?;
        result
    }

    /// Apply a whole-record edit.
    pub async fn update(&self, id: FileId, update: &FileUpdate) -> Result<FileRecord, AppError> {
        let updated = self.client.update_file(id, update).await?;
        self.invalidate().await?;
        info!(file_id = %id, "File updated");
        Ok(updated)
    }

    /// Delete a file.
    pub async fn delete(&self, id: FileId) -> Result<(), AppError> {
        self.client.delete_file(id).await?;
        self.invalidate().await?;
        info!(file_id = %id, "File deleted");
        Ok(())
    }

    /// Drop every cached file entry.
    pub async fn invalidate(&self) -> Result<(), AppError> {
        let removed = self.cache.delete_pattern(&keys::files_pattern()).await?;
        debug!(removed, "File cache invalidated");
        Ok(())
    }

    /// The underlying data client.
    pub fn client(&self) -> &Arc<dyn DataClient> {
        &self.client
    }
}
