//! Data backend selection.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Which implementation of the data client is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// The REST backend at `base_url`.
    Rest,
    /// The local demo backend.
    #[default]
    Mock,
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => write!(f, "rest"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// REST backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BackendConfig {
    /// Backend implementation to use.
    #[serde(default)]
    pub mode: BackendMode,
    /// Base URL of the REST backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path prefix under which the API is mounted.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1, message = "backend.timeout_seconds must be at least 1"))]
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_timeout() -> u64 {
    30
}
