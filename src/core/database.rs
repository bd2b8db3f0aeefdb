use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::core::config::DatabaseConfig;
use crate::modules::kv::{KvStores, PostgresKvStore};

const ANALYTICS_NAMESPACE: &str = "analytics";
const CONTACTS_NAMESPACE: &str = "contacts";

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Creates the `kv_entries` table and its expiry index if missing
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Both KV namespaces backed by one pool
pub fn postgres_stores(pool: PgPool) -> KvStores {
    KvStores {
        analytics: Arc::new(PostgresKvStore::new(pool.clone(), ANALYTICS_NAMESPACE)),
        contacts: Arc::new(PostgresKvStore::new(pool, CONTACTS_NAMESPACE)),
    }
}
