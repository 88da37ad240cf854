// Secure credential store abstraction
//
// The platform keystore exposes get/set/reset by a named service key. Two
// logical records exist: "secret" (raw string) and "passportData" (JSON).
// Only the identity manager writes here; everything else treats the store
// as a read-only input.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{StoreError, StoreResult};

#[async_trait]
pub trait SecureStore: Send + Sync {
    async fn get(&self, service: &str) -> StoreResult<Option<String>>;
    async fn set(&self, service: &str, value: &str) -> StoreResult<()>;
    async fn reset(&self, service: &str) -> StoreResult<()>;
}

/// In-memory store for tests and ephemeral runs. Counts writes so tests
/// can assert the one-write-ever secret contract.
#[derive(Default)]
pub struct MemorySecureStore {
    values: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemorySecureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `set` calls seen since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    async fn get(&self, service: &str) -> StoreResult<Option<String>> {
        Ok(self.values.read().await.get(service).cloned())
    }

    async fn set(&self, service: &str, value: &str) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values
            .write()
            .await
            .insert(service.to_string(), value.to_string());
        Ok(())
    }

    async fn reset(&self, service: &str) -> StoreResult<()> {
        self.values.write().await.remove(service);
        Ok(())
    }
}

/// File-backed store keeping all services in one JSON document. Stands in
/// for the native keystore on platforms without one; the file holds the
/// identity secret, so it belongs on an encrypted volume.
pub struct FileSecureStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSecureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    async fn load(&self) -> StoreResult<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StoreError::Decode(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    async fn save(&self, values: &HashMap<String, String>) -> StoreResult<()> {
        let contents =
            serde_json::to_string_pretty(values).map_err(|e| StoreError::Decode(e.to_string()))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl SecureStore for FileSecureStore {
    async fn get(&self, service: &str) -> StoreResult<Option<String>> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.get(service).cloned())
    }

    async fn set(&self, service: &str, value: &str) -> StoreResult<()> {
        let _guard = self.lock.write().await;
        let mut values = self.load().await?;
        values.insert(service.to_string(), value.to_string());
        self.save(&values).await
    }

    async fn reset(&self, service: &str) -> StoreResult<()> {
        let _guard = self.lock.write().await;
        let mut values = self.load().await?;
        values.remove(service);
        self.save(&values).await
    }
}
