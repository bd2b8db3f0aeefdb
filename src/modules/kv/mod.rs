//! Key-value storage with per-key expiry
//!
//! Every store speaks the same two operations: `get` and `put` with an
//! optional expiration in seconds. Expired entries are never returned.
//! Stores make no promise of atomic read-modify-write; callers that
//! read, modify and write back must tolerate lost updates.
//!
//! ## Namespaces
//!
//! ```text
//! analytics   rate_limit:{ip}[:{endpoint}]       → JSON array of ms timestamps
//!             analytics:{YYYY-MM-DD}:{requestId} → sampled request record (7 days)
//! contacts    contact:{uuid} / inquiry:{uuid} / newsletter:{uuid}
//! ```

mod memory;
mod postgres;

pub use memory::MemoryKvStore;
pub use postgres::PostgresKvStore;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns the live value at `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Writes `value` at `key`, replacing any previous value.
    /// `expiration_secs` of `None` keeps the entry until overwritten.
    async fn put(&self, key: &str, value: &str, expiration_secs: Option<u64>)
        -> Result<(), KvError>;

    /// Drops expired entries, returning how many were removed.
    async fn purge_expired(&self) -> Result<u64, KvError>;
}

/// Bounds every operation of the inner store by a fixed timeout.
pub struct TimeoutKvStore {
    inner: Arc<dyn KvStore>,
    timeout: Duration,
}

impl TimeoutKvStore {
    pub fn new(inner: Arc<dyn KvStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl KvStore for TimeoutKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        tokio::time::timeout(self.timeout, self.inner.get(key))
            .await
            .map_err(|_| KvError::Timeout(self.timeout))?
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        expiration_secs: Option<u64>,
    ) -> Result<(), KvError> {
        tokio::time::timeout(self.timeout, self.inner.put(key, value, expiration_secs))
            .await
            .map_err(|_| KvError::Timeout(self.timeout))?
    }

    async fn purge_expired(&self) -> Result<u64, KvError> {
        tokio::time::timeout(self.timeout, self.inner.purge_expired())
            .await
            .map_err(|_| KvError::Timeout(self.timeout))?
    }
}

/// The two namespaces the application writes to.
#[derive(Clone)]
pub struct KvStores {
    /// Rate-limit counters and sampled analytics records
    pub analytics: Arc<dyn KvStore>,
    /// Contact, inquiry and newsletter submissions
    pub contacts: Arc<dyn KvStore>,
}

impl KvStores {
    /// Fresh in-memory namespaces, used in development and tests.
    pub fn in_memory() -> Self {
        Self {
            analytics: Arc::new(MemoryKvStore::new()),
            contacts: Arc::new(MemoryKvStore::new()),
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            analytics: Arc::new(TimeoutKvStore::new(self.analytics, timeout)),
            contacts: Arc::new(TimeoutKvStore::new(self.contacts, timeout)),
        }
    }
}

/// Periodically purges expired entries from every namespace.
pub async fn run_expiry_sweeper(stores: KvStores, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    tracing::info!("KV expiry sweeper started (interval: {:?})", interval);

    loop {
        ticker.tick().await;

        for (name, store) in [("analytics", &stores.analytics), ("contacts", &stores.contacts)] {
            match store.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => {
                    tracing::debug!("Purged {} expired entries from '{}'", removed, name)
                }
                Err(e) => tracing::warn!("Failed to purge expired entries from '{}': {}", name, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::StalledKvStore;

    #[tokio::test(start_paused = true)]
    async fn test_timeout_store_reports_timeout() {
        let store = TimeoutKvStore::new(Arc::new(StalledKvStore), Duration::from_millis(50));

        let result = store.get("rate_limit:1.2.3.4").await;
        assert!(matches!(result, Err(KvError::Timeout(_))));

        let result = store.put("rate_limit:1.2.3.4", "[]", Some(1)).await;
        assert!(matches!(result, Err(KvError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_timeout_store_passes_through() {
        let store = TimeoutKvStore::new(Arc::new(MemoryKvStore::new()), Duration::from_secs(1));

        store.put("k", "v", None).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
    }
}
