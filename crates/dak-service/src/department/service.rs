//! Cached department list.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use dak_cache::CacheManager;
use dak_cache::keys;
use dak_client::DataClient;
use dak_core::error::AppError;
use dak_core::traits::cache::CacheProvider;
use dak_entity::department::{Department, NewDepartment};

/// Lists departments and adds custom ones.
#[derive(Debug, Clone)]
pub struct DepartmentService {
    /// Backend client.
    client: Arc<dyn DataClient>,
    /// Query cache.
    cache: Arc<CacheManager>,
    /// Lifetime of the cached list.
    ttl: Duration,
}

impl DepartmentService {
    /// Creates a new department service.
    pub fn new(client: Arc<dyn DataClient>, cache: Arc<CacheManager>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    /// All departments.
    pub async fn list(&self) -> Result<Vec<Department>, AppError> {
        let key = keys::department_list();
        if let Some(departments) = self.cache.get_json::<Vec<Department>>(&key).await? {
            return Ok(departments);
        }

        let departments = self.client.list_departments().await?;
        self.cache.set_json(&key, &departments, self.ttl).await?;
        debug!(count = departments.len(), "Department list fetched");
        Ok(departments)
    }

    /// Add a user-defined department.
    pub async fn add_custom(&self, name: &str) -> Result<Department, AppError> {
        let new = NewDepartment::custom(name);
        if new.name.is_empty() {
            return Err(AppError::validation("Department name is required"));
        }

        let department = self.client.add_department(&new).await?;
        self.cache.delete(&keys::department_list()).await?;
        info!(name = %department.name, "Department added");
        Ok(department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::test_support::counting_client;
    use dak_core::config::CacheConfig;

    fn service() -> (DepartmentService, crate::file::test_support::Calls) {
        let (client, calls) = counting_client();
        let cache = Arc::new(CacheManager::new(&CacheConfig::default()).unwrap());
        (
            DepartmentService::new(client, cache, Duration::from_secs(60)),
            calls,
        )
    }

    #[tokio::test]
    async fn test_list_is_cached() {
        let (service, calls) = service();
        let first = service.list().await.unwrap();
        let second = service.list().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.list_departments(), 1);
        assert!(first.iter().any(|d| d.name == "Finance"));
    }

    #[tokio::test]
    async fn test_add_custom_invalidates() {
        let (service, calls) = service();
        service.list().await.unwrap();

        let added = service.add_custom("  Legal ").await.unwrap();
        assert_eq!(added.name, "Legal");
        assert!(added.is_custom);

        let departments = service.list().await.unwrap();
        assert_eq!(calls.list_departments(), 2);
        assert!(departments.iter().any(|d| d.name == "Legal"));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (service, _) = service();
        let err = service.add_custom("   ").await.unwrap_err();
        assert!(err.is_validation());
    }
}
