//! Sequential file numbers per file type.
//!
//! The counter is derived from the current file list, so two generations
//! running at the same time can hand out the same number.

use std::sync::Arc;

use tracing::debug;

use dak_client::DataClient;
use dak_core::error::AppError;
use dak_entity::file::{FileRecord, FileType};

/// Next number for `file_type` given the existing files.
pub fn next_file_number(files: &[FileRecord], file_type: FileType) -> String {
    let prefix = format!("FT/{}/", file_type.number_prefix());
    let count = files
        .iter()
        .filter(|f| f.file_number.starts_with(&prefix))
        .count();
    format!("{prefix}{:03}", count + 1)
}

/// Generates file numbers from a fresh file list.
#[derive(Debug, Clone)]
pub struct FileNumberGenerator {
    client: Arc<dyn DataClient>,
}

impl FileNumberGenerator {
    /// Creates a new generator.
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// Generate the next number for `file_type`.
    pub async fn generate(&self, file_type: FileType) -> Result<String, AppError> {
        let files = self.client.list_files().await?;
        let number = next_file_number(&files, file_type);
        debug!(file_type = %file_type, number = %number, "Generated file number");
        Ok(number)
    }
}
