//! Key/value stores backing the demo backend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use dak_core::error::AppError;
use dak_core::result::AppResult;
use dak_core::traits::kv_store::KeyValueStore;

/// File name of the persisted store inside the data directory.
const STORE_FILE: &str = "store.json";

/// Volatile store used in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON document in a data directory.
///
/// Every write rewrites the document through a temporary file and a
/// rename, so a crash never leaves a half-written store behind.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Arc<DashMap<String, String>>,
    write_lock: Arc<Mutex<()>>,
}

impl FileKeyValueStore {
    /// Open (or create) the store in `data_dir`.
    pub async fn open(data_dir: impl AsRef<Path>) -> AppResult<Self> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create data directory '{}': {e}",
                data_dir.display()
            ))
        })?;

        let path = data_dir.join(STORE_FILE);
        let entries = DashMap::new();
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) if !raw.trim().is_empty() => {
                let saved: BTreeMap<String, String> = serde_json::from_str(&raw)?;
                for (key, value) in saved {
                    entries.insert(key, value);
                }
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        debug!(path = %path.display(), keys = entries.len(), "Demo store opened");

        Ok(Self {
            path,
            entries: Arc::new(entries),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Location of the store document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let snapshot: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let json = serde_json::to_string_pretty(&snapshot)?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist().await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        if self.entries.remove(key).is_some() {
            self.persist().await?;
        }
        Ok(())
    }
}
