//! Authentication and session configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credential rules checked on the client before contacting the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthConfig {
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    #[validate(range(min = 1, message = "auth.password_min_length must be at least 1"))]
    pub password_min_length: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min(),
        }
    }
}

/// Where the bearer token and signed-in user are kept between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionConfig {
    /// Path to the session file.
    #[serde(default = "default_session_file")]
    #[validate(length(min = 1, message = "session.file must not be empty"))]
    pub file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

fn default_password_min() -> u64 {
    8
}

fn default_session_file() -> String {
    "./data/session.json".to_string()
}
