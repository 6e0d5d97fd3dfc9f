//! Demo backend configuration.

use serde::{Deserialize, Serialize};

/// Settings for the local demo backend.
///
/// Delays simulate network latency so the demo behaves like the real
/// backend; tests set them to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Directory holding the persisted key/value store.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Delay applied to ordinary calls, in milliseconds.
    #[serde(default = "default_delay")]
    pub delay_ms: u64,
    /// Delay applied to login and registration.
    #[serde(default = "default_auth_delay")]
    pub auth_delay_ms: u64,
    /// Delay applied to attachment uploads.
    #[serde(default = "default_upload_delay")]
    pub upload_delay_ms: u64,
    /// Delay applied to sending email.
    #[serde(default = "default_email_delay")]
    pub email_delay_ms: u64,
}

impl MockConfig {
    /// A configuration with every delay set to zero.
    pub fn instant(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            delay_ms: 0,
            auth_delay_ms: 0,
            upload_delay_ms: 0,
            email_delay_ms: 0,
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            delay_ms: default_delay(),
            auth_delay_ms: default_auth_delay(),
            upload_delay_ms: default_upload_delay(),
            email_delay_ms: default_email_delay(),
        }
    }
}

fn default_data_dir() -> String {
    "./data/mock".to_string()
}

fn default_delay() -> u64 {
    300
}

fn default_auth_delay() -> u64 {
    500
}

fn default_upload_delay() -> u64 {
    800
}

fn default_email_delay() -> u64 {
    600
}
