//! Login, registration and logout.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use dak_client::{DataClient, Session, SessionStore};
use dak_core::config::AuthConfig;
use dak_core::error::AppError;
use dak_entity::user::{AuthUser, Credentials};

/// Sign-in form input.
#[derive(Debug, Validate)]
struct SignInInput {
    #[validate(email(message = "Please enter a valid email address"))]
    email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

impl SignInInput {
    fn check(credentials: &Credentials) -> Result<(), AppError> {
        if credentials.email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        Self {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        }
        .validate()?;
        Ok(())
    }
}

/// Manages the signed-in session.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Backend client.
    client: Arc<dyn DataClient>,
    /// Shared session the clients read tokens from.
    session: Session,
    /// Where the session is persisted.
    store: SessionStore,
    /// Password rules.
    config: AuthConfig,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        client: Arc<dyn DataClient>,
        session: Session,
        store: SessionStore,
        config: AuthConfig,
    ) -> Self {
        Self {
            client,
            session,
            store,
            config,
        }
    }

    /// Sign in and persist the session.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthUser, AppError> {
        SignInInput::check(credentials)?;

        let tokens = self.client.login(credentials).await?;
        self.session.sign_in(&tokens).await;
        self.store.save(&self.session).await?;

        info!(email = %tokens.user.email, "User signed in");
        Ok(tokens.user)
    }

    /// Create an account, sign in and persist the session.
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthUser, AppError> {
        SignInInput::check(credentials)?;
        let min = self.config.password_min_length as usize;
        if credentials.password.chars().count() < min {
            return Err(AppError::validation(format!(
                "Password must be at least {min} characters long"
            )));
        }

        let tokens = self.client.register(credentials).await?;
        self.session.sign_in(&tokens).await;
        self.store.save(&self.session).await?;

        info!(email = %tokens.user.email, "User registered");
        Ok(tokens.user)
    }

    /// Clear the session in memory and on disk.
    pub async fn logout(&self) -> Result<(), AppError> {
        let user = self.session.user().await;
        self.session.sign_out().await;
        self.store.save(&self.session).await?;
        if let Some(user) = user {
            info!(email = %user.email, "User signed out");
        }
        Ok(())
    }

    /// The user the session belongs to, as reported by the backend.
    pub async fn current_user(&self) -> Result<AuthUser, AppError> {
        self.client.current_user().await
    }

    /// The shared session.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dak_client::MockDataClient;
    use dak_client::mock::MemoryKeyValueStore;
    use dak_core::config::MockConfig;
    use dak_core::error::ErrorKind;

    fn service(dir: &std::path::Path) -> AuthService {
        let session = Session::new();
        let client = MockDataClient::new(
            Arc::new(MemoryKeyValueStore::new()),
            session.clone(),
            MockConfig::instant("unused"),
        );
        AuthService::new(
            Arc::new(client),
            session,
            SessionStore::new(dir.join("session.json")),
            AuthConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(dir.path());

        let user = auth
            .login(&Credentials::new("clerk@example.com", "secret-pass"))
            .await
            .unwrap();
        assert_eq!(user.email, "clerk@example.com");
        assert!(auth.session().is_authenticated().await);

        let restored = SessionStore::new(dir.path().join("session.json"))
            .load()
            .await
            .unwrap();
        assert_eq!(restored.user().await, Some(user));
    }

    #[tokio::test]
    async fn test_login_validation() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(dir.path());

        let err = auth.login(&Credentials::new("", "x")).await.unwrap_err();
        assert_eq!(err.message, "Email is required");

        let err = auth
            .login(&Credentials::new("not-an-email", "x"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Please enter a valid email address");

        let err = auth
            .login(&Credentials::new("clerk@example.com", ""))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Password is required");
        assert!(!auth.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_register_password_length() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(dir.path());

        let err = auth
            .register(&Credentials::new("new@example.com", "short"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Password must be at least 8 characters long");

        auth.register(&Credentials::new("new@example.com", "long-enough"))
            .await
            .unwrap();
        assert_eq!(auth.current_user().await.unwrap().email, "new@example.com");
    }

    #[tokio::test]
    async fn test_logout_clears_file() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(dir.path());
        auth.login(&Credentials::new("clerk@example.com", "secret-pass"))
            .await
            .unwrap();

        auth.logout().await.unwrap();
        assert!(!auth.session().is_authenticated().await);
        assert!(!dir.path().join("session.json").exists());

        let err = auth.current_user().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
