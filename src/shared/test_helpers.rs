//! Store doubles and app fixtures shared by unit and route tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;

use crate::core::app::{build_router, AppServices};
use crate::core::config::{
    AnalyticsConfig, AppConfig, Config, KvBackend, KvConfig, RateLimitConfig, RateLimitScope,
    SwaggerConfig,
};
use crate::modules::kv::{KvError, KvStore, KvStores, MemoryKvStore};

/// Memory store that fails reads, writes, or both.
pub struct FailingKvStore {
    inner: MemoryKvStore,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingKvStore {
    pub fn reads() -> Self {
        Self {
            inner: MemoryKvStore::new(),
            fail_reads: true,
            fail_writes: false,
        }
    }

    pub fn writes() -> Self {
        Self {
            inner: MemoryKvStore::new(),
            fail_reads: false,
            fail_writes: true,
        }
    }

    pub fn all() -> Self {
        Self {
            inner: MemoryKvStore::new(),
            fail_reads: true,
            fail_writes: true,
        }
    }
}

#[async_trait]
impl KvStore for FailingKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        if self.fail_reads {
            return Err(KvError::Unavailable("simulated read failure".to_string()));
        }
        self.inner.get(key).await
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        expiration_secs: Option<u64>,
    ) -> Result<(), KvError> {
        if self.fail_writes {
            return Err(KvError::Unavailable("simulated write failure".to_string()));
        }
        self.inner.put(key, value, expiration_secs).await
    }

    async fn purge_expired(&self) -> Result<u64, KvError> {
        self.inner.purge_expired().await
    }
}

/// Memory store that remembers the key and expiry of every write.
pub struct RecordingKvStore {
    inner: MemoryKvStore,
    puts: Mutex<Vec<(String, Option<u64>)>>,
}

impl RecordingKvStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryKvStore::new(),
            puts: Mutex::new(Vec::new()),
        }
    }

    pub fn puts(&self) -> Vec<(String, Option<u64>)> {
        self.puts.lock().unwrap().clone()
    }

    /// Keys written so far that start with `prefix`
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.puts()
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl KvStore for RecordingKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        self.inner.get(key).await
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        expiration_secs: Option<u64>,
    ) -> Result<(), KvError> {
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), expiration_secs));
        self.inner.put(key, value, expiration_secs).await
    }

    async fn purge_expired(&self) -> Result<u64, KvError> {
        self.inner.purge_expired().await
    }
}

/// Store whose operations never complete.
pub struct StalledKvStore;

#[async_trait]
impl KvStore for StalledKvStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, KvError> {
        std::future::pending().await
    }

    async fn put(
        &self,
        _key: &str,
        _value: &str,
        _expiration_secs: Option<u64>,
    ) -> Result<(), KvError> {
        std::future::pending().await
    }

    async fn purge_expired(&self) -> Result<u64, KvError> {
        std::future::pending().await
    }
}

/// Memory store whose writes take `delay` to land.
pub struct SlowWriteKvStore {
    inner: MemoryKvStore,
    delay: Duration,
}

impl SlowWriteKvStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryKvStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl KvStore for SlowWriteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        self.inner.get(key).await
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        expiration_secs: Option<u64>,
    ) -> Result<(), KvError> {
        tokio::time::sleep(self.delay).await;
        self.inner.put(key, value, expiration_secs).await
    }

    async fn purge_expired(&self) -> Result<u64, KvError> {
        self.inner.purge_expired().await
    }
}

/// Development-like configuration with analytics sampling switched off.
pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["https://myesimplus.com".to_string()],
            environment: "test".to_string(),
            api_version: "v1".to_string(),
        },
        rate_limit: RateLimitConfig::new(60_000, 100, RateLimitScope::Global).unwrap(),
        analytics: AnalyticsConfig { sample_rate: 0.0 },
        kv: KvConfig {
            backend: KvBackend::Memory,
            timeout: Duration::from_secs(2),
            database: None,
        },
        swagger: SwaggerConfig {
            username: None,
            password: None,
            title: "MyeSIMPlus API".to_string(),
            version: "1.0.0".to_string(),
            description: "Test".to_string(),
        },
    }
}

pub fn test_router(config: &Config, stores: KvStores) -> Router {
    build_router(config, AppServices::new(config, stores).unwrap())
}

pub fn test_server_with(config: &Config, stores: KvStores) -> TestServer {
    TestServer::new(test_router(config, stores)).unwrap()
}

pub fn test_server() -> TestServer {
    test_server_with(&test_config(), KvStores::in_memory())
}

/// In-memory namespaces whose contacts store records every write
pub fn recording_stores() -> (KvStores, Arc<RecordingKvStore>) {
    let contacts = Arc::new(RecordingKvStore::new());
    let stores = KvStores {
        analytics: Arc::new(MemoryKvStore::new()),
        contacts: contacts.clone(),
    };
    (stores, contacts)
}
