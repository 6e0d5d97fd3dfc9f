//! Picks the data client named in configuration.

use std::sync::Arc;

use tracing::debug;

use dak_core::config::AppConfig;
use dak_core::config::backend::BackendMode;
use dak_core::result::AppResult;

use crate::client::DataClient;
use crate::mock::{FileKeyValueStore, MockDataClient};
use crate::rest::RestDataClient;
use crate::session::Session;

/// Build the configured data client over `session`.
pub async fn build_client(config: &AppConfig, session: Session) -> AppResult<Arc<dyn DataClient>> {
    let client: Arc<dyn DataClient> = match config.backend.mode {
        BackendMode::Rest => {
            debug!(base_url = %config.backend.base_url, "Using REST backend");
            Arc::new(RestDataClient::new(&config.backend, session)?)
        }
        BackendMode::Mock => {
            debug!(data_dir = %config.mock.data_dir, "Using demo backend");
            let store = FileKeyValueStore::open(&config.mock.data_dir).await?;
            Arc::new(MockDataClient::new(
                Arc::new(store),
                session,
                config.mock.clone(),
            ))
        }
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dak_core::config::mock::MockConfig;

    #[tokio::test]
    async fn test_selects_backend_from_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig {
            mock: MockConfig::instant(dir.path().to_string_lossy()),
            ..AppConfig::default()
        };

        let mock = build_client(&config, Session::new()).await.unwrap();
        assert_eq!(mock.backend_name(), "mock");

        config.backend.mode = BackendMode::Rest;
        let rest = build_client(&config, Session::new()).await.unwrap();
        assert_eq!(rest.backend_name(), "rest");
    }
}
