//! Root-level authentication check.

use std::sync::Arc;

use tracing::debug;

use dak_client::{DataClient, Session};
use dak_core::error::AppError;
use dak_entity::user::AuthUser;

/// Asks the backend once whether the session is still valid.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    client: Arc<dyn DataClient>,
    session: Session,
}

impl AuthGuard {
    /// Creates a new guard.
    pub fn new(client: Arc<dyn DataClient>, session: Session) -> Self {
        Self { client, session }
    }

    /// The signed-in user, or an authentication error.
    pub async fn require(&self) -> Result<AuthUser, AppError> {
        if !self.session.is_authenticated().await {
            return Err(AppError::authentication(
                "Not signed in. Run `dak auth login` first",
            ));
        }

        let user = self.client.current_user().await.map_err(|e| {
            if e.kind == dak_core::error::ErrorKind::Authentication {
                AppError::authentication("Session expired. Run `dak auth login` again")
            } else {
                e
            }
        })?;
        self.session.set_user(user.clone()).await;
        debug!(email = %user.email, backend = self.client.backend_name(), "Session verified");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dak_client::MockDataClient;
    use dak_client::mock::MemoryKeyValueStore;
    use dak_core::config::MockConfig;
    use dak_core::error::ErrorKind;
    use dak_entity::user::Credentials;

    #[tokio::test]
    async fn test_require_signed_in() {
        let session = Session::new();
        let client: Arc<dyn DataClient> = Arc::new(MockDataClient::new(
            Arc::new(MemoryKeyValueStore::new()),
            session.clone(),
            MockConfig::instant("unused"),
        ));
        let guard = AuthGuard::new(client.clone(), session.clone());

        let err = guard.require().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        let tokens = client
            .login(&Credentials::new("clerk@example.com", "secret-pass"))
            .await
            .unwrap();
        session.sign_in(&tokens).await;

        let user = guard.require().await.unwrap();
        assert_eq!(user.email, "clerk@example.com");
    }
}
