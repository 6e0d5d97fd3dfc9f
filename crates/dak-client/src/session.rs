//! The signed-in session shared by the data clients.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use dak_core::error::AppError;
use dak_core::result::AppResult;
use dak_entity::user::{AuthTokens, AuthUser};

/// Serializable session contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Bearer token attached to API calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Refresh token issued with the access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// The signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

/// Shared handle to the current session.
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    /// An empty, signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session restored from saved state.
    pub fn from_state(state: SessionState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Current bearer token.
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.access_token.clone()
    }

    /// Current user.
    pub async fn user(&self) -> Option<AuthUser> {
        self.inner.read().await.user.clone()
    }

    /// Whether a token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.access_token.is_some()
    }

    /// Store freshly issued tokens.
    pub async fn sign_in(&self, tokens: &AuthTokens) {
        let mut state = self.inner.write().await;
        state.access_token = Some(tokens.access.clone());
        state.refresh_token = Some(tokens.refresh.clone()).filter(|t| !t.is_empty());
        state.user = Some(tokens.user.clone());
    }

    /// Replace the stored user after a `current_user` check.
    pub async fn set_user(&self, user: AuthUser) {
        self.inner.write().await.user = Some(user);
    }

    /// Forget tokens and user.
    pub async fn sign_out(&self) {
        *self.inner.write().await = SessionState::default();
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> SessionState {
        self.inner.read().await.clone()
    }
}

/// Persists the session to a JSON file between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session, or an empty one when none is saved.
    pub async fn load(&self) -> AppResult<Session> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(Session::new()),
            Ok(raw) => {
                let state: SessionState = serde_json::from_str(&raw)?;
                debug!(path = %self.path.display(), "Session restored");
                Ok(Session::from_state(state))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::new()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read session file '{}': {e}",
                self.path.display()
            ))),
        }
    }

    /// Write the session to disk, or remove the file when signed out.
    pub async fn save(&self, session: &Session) -> AppResult<()> {
        let state = session.snapshot().await;
        if state == SessionState::default() {
            return self.clear().await;
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&state)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Delete the session file if present.
    pub async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
