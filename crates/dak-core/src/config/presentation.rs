//! File list and email composer settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// File list presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TableConfig {
    /// Rows per page.
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, message = "table.page_size must be at least 1"))]
    pub page_size: u64,
    /// Default export path for `file list --export`.
    #[serde(default = "default_export_path")]
    #[validate(length(min = 1, message = "table.export_path must not be empty"))]
    pub export_path: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            export_path: default_export_path(),
        }
    }
}

/// Defaults for the email composer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Address copied on every outbound email unless overridden.
    #[serde(default = "default_cc")]
    pub default_cc: String,
    /// Prefix of the default subject; the file title is appended.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            default_cc: default_cc(),
            subject_prefix: default_subject_prefix(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_export_path() -> String {
    "files_list.csv".to_string()
}

fn default_cc() -> String {
    "office@example.com".to_string()
}

fn default_subject_prefix() -> String {
    "Regarding File: ".to_string()
}
