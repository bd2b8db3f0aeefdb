//! Durable key-value store on top of a single Postgres table
//!
//! Rows past `expires_at` are filtered out on read and deleted by
//! [`KvStore::purge_expired`].

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;

use super::{KvError, KvStore};

pub struct PostgresKvStore {
    pool: PgPool,
    namespace: String,
}

impl PostgresKvStore {
    pub fn new(pool: PgPool, namespace: impl Into<String>) -> Self {
        Self {
            pool,
            namespace: namespace.into(),
        }
    }
}

#[async_trait]
impl KvStore for PostgresKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let value: Option<String> = sqlx::query_scalar(
            r#"
            SELECT value
            FROM kv_entries
            WHERE namespace = $1
              AND key = $2
              AND (expires_at IS NULL OR expires_at > NOW())
            "#,
        )
        .bind(&self.namespace)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read kv entry '{}': {:?}", key, e);
            KvError::Database(e)
        })?;

        Ok(value)
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        expiration_secs: Option<u64>,
    ) -> Result<(), KvError> {
        // An expiry too far out to represent is treated as no expiry
        let expires_at = expiration_secs
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));

        sqlx::query(
            r#"
            INSERT INTO kv_entries (namespace, key, value, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (namespace, key)
            DO UPDATE SET value = EXCLUDED.value,
                          expires_at = EXCLUDED.expires_at,
                          updated_at = NOW()
            "#,
        )
        .bind(&self.namespace)
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write kv entry '{}': {:?}", key, e);
            KvError::Database(e)
        })?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, KvError> {
        let result = sqlx::query(
            r#"
            DELETE FROM kv_entries
            WHERE namespace = $1
              AND expires_at IS NOT NULL
              AND expires_at <= NOW()
            "#,
        )
        .bind(&self.namespace)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
