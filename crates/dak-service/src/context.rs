//! Wiring of the client, cache and session into services.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use dak_cache::CacheManager;
use dak_client::{DataClient, Session, SessionStore, build_client};
use dak_core::config::AppConfig;
use dak_core::error::AppError;

use crate::auth::{AuthGuard, AuthService};
use crate::department::DepartmentService;
use crate::email::EmailService;
use crate::file::{FileNumberGenerator, FileStore, LifecycleService};

/// Everything a front end needs to build services.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Shared session.
    pub session: Session,
    /// Session persistence.
    pub session_store: SessionStore,
    /// Configured backend.
    pub client: Arc<dyn DataClient>,
    /// Query cache.
    pub cache: Arc<CacheManager>,
}

impl AppContext {
    /// Restore the saved session and build the configured backend.
    pub async fn bootstrap(config: AppConfig) -> Result<Self, AppError> {
        let session_store = SessionStore::new(&config.session.file);
        let session = session_store.load().await?;
        let client = build_client(&config, session.clone()).await?;
        let cache = Arc::new(CacheManager::new(&config.cache)?);
        debug!(backend = client.backend_name(), "Application context ready");

        Ok(Self::from_parts(
            Arc::new(config),
            session,
            session_store,
            client,
            cache,
        ))
    }

    /// Assemble a context from prebuilt parts.
    pub fn from_parts(
        config: Arc<AppConfig>,
        session: Session,
        session_store: SessionStore,
        client: Arc<dyn DataClient>,
        cache: Arc<CacheManager>,
    ) -> Self {
        Self {
            config,
            session,
            session_store,
            client,
            cache,
        }
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.cache.default_ttl_seconds)
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.client.clone(), self.cache.clone(), self.ttl())
    }

    pub fn lifecycle(&self) -> LifecycleService {
        LifecycleService::new(self.file_store())
    }

    pub fn number_generator(&self) -> FileNumberGenerator {
        FileNumberGenerator::new(self.client.clone())
    }

    pub fn departments(&self) -> DepartmentService {
        DepartmentService::new(self.client.clone(), self.cache.clone(), self.ttl())
    }

    pub fn email(&self) -> EmailService {
        EmailService::new(self.client.clone(), self.cache.clone(), self.ttl())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(
            self.client.clone(),
            self.session.clone(),
            self.session_store.clone(),
            self.config.auth.clone(),
        )
    }

    pub fn guard(&self) -> AuthGuard {
        AuthGuard::new(self.client.clone(), self.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dak_core::config::{BackendMode, MockConfig};

    #[tokio::test]
    async fn test_bootstrap_mock_backend() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.backend.mode = BackendMode::Mock;
        config.mock = MockConfig::instant(dir.path().join("mock").display().to_string());
        config.session.file = dir.path().join("session.json").display().to_string();

        let ctx = AppContext::bootstrap(config).await.unwrap();
        assert_eq!(ctx.client.backend_name(), "mock");
        assert!(!ctx.session.is_authenticated().await);

        let files = ctx.file_store().list().await.unwrap();
        assert_eq!(files.len(), 2);
    }
}
