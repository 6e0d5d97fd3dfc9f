//! Shared test helpers for integration tests.

use std::sync::Arc;

use tempfile::TempDir;

use dak_cache::CacheManager;
use dak_client::mock::MemoryKeyValueStore;
use dak_client::{DataClient, MockDataClient, Session, SessionStore};
use dak_core::config::{AppConfig, MockConfig};
use dak_entity::user::Credentials;
use dak_service::AppContext;

/// Test application over the demo backend with no simulated delay.
pub struct TestApp {
    /// Wired services.
    pub ctx: AppContext,
    /// Holds the session file.
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = AppConfig::default();
        config.mock = MockConfig::instant(dir.path().display().to_string());
        config.session.file = dir.path().join("session.json").display().to_string();

        let session = Session::new();
        let client: Arc<dyn DataClient> = Arc::new(MockDataClient::new(
            Arc::new(MemoryKeyValueStore::new()),
            session.clone(),
            config.mock.clone(),
        ));
        let cache = Arc::new(CacheManager::new(&config.cache).expect("Failed to init cache"));
        let store = SessionStore::new(&config.session.file);

        let ctx = AppContext::from_parts(Arc::new(config), session, store, client, cache);
        Self { ctx, _dir: dir }
    }

    /// Create a test application with a signed-in user.
    pub async fn signed_in(email: &str) -> Self {
        let app = Self::new().await;
        app.ctx
            .auth()
            .login(&Credentials::new(email, "password123"))
            .await
            .expect("Failed to sign in");
        app
    }
}
