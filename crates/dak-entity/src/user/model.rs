//! Signed-in user and credential models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wire;

/// The signed-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Backend user identifier.
    #[serde(deserialize_with = "wire::string_or_number")]
    pub id: String,
    /// Login email.
    pub email: String,
}

/// Tokens issued on login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Bearer token for API calls.
    pub access: String,
    /// Token used to obtain a new access token.
    #[serde(default)]
    pub refresh: String,
    /// The user the tokens belong to.
    #[serde(flatten)]
    pub user: AuthUser,
}

/// Email and password submitted for login or registration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl Credentials {
    /// Build credentials, trimming the email.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_flattened_numeric_id() {
        let tokens: AuthTokens = serde_json::from_str(
            r#"{"id": 42, "email": "clerk@example.com", "access": "a.b.c", "refresh": "r.s.t"}"#,
        )
        .expect("deserialize");
        assert_eq!(tokens.user.id, "42");
        assert_eq!(tokens.user.email, "clerk@example.com");
        assert_eq!(tokens.access, "a.b.c");
    }

    #[test]
    fn test_user_string_id() {
        let user: AuthUser =
            serde_json::from_str(r#"{"id": "user_clerk", "email": "clerk@example.com"}"#)
                .expect("deserialize");
        assert_eq!(user.id, "user_clerk");
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new(" clerk@example.com ", "hunter22");
        assert_eq!(creds.email, "clerk@example.com");
        assert!(!format!("{creds:?}").contains("hunter22"));
    }
}
