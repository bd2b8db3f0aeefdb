use std::sync::Arc;

use crate::core::config::{RateLimitConfig, RateLimitScope};
use crate::modules::kv::{KvError, KvStore};

/// Outcome of one admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request counted against the window
    Admitted {
        limit: u32,
        remaining: u32,
        /// Unix seconds at which the window opened by this request closes
        reset_at: u64,
    },
    /// Window is full; nothing was written
    Rejected {
        limit: u32,
        /// Seconds until the oldest active hit leaves the window
        retry_after: u64,
        reset_at: u64,
    },
    /// The store failed, so the request is let through unchecked
    FailedOpen,
}

#[cfg(test)]
impl RateLimitDecision {
    pub fn is_admitted(&self) -> bool {
        !matches!(self, RateLimitDecision::Rejected { .. })
    }
}

/// Sliding-window admission controller over a key-value store.
///
/// Each key holds a JSON array of millisecond timestamps. A check reads the
/// array, drops hits older than the window, and either rejects or writes the
/// survivors back with `now` appended.
///
/// The read and the write are separate store calls, so two concurrent checks
/// for the same key can both read the same hits and both admit. Under bursts
/// from a single caller this lets slightly more than `max_requests` through;
/// the limit is a soft cap.
pub struct RateLimitService {
    store: Arc<dyn KvStore>,
    window_ms: i64,
    max_requests: u32,
    expiration_secs: u64,
    scope: RateLimitScope,
}

impl RateLimitService {
    pub fn new(store: Arc<dyn KvStore>, config: &RateLimitConfig) -> Self {
        Self {
            store,
            window_ms: i64::try_from(config.window_ms).unwrap_or(i64::MAX),
            max_requests: config.max_requests,
            expiration_secs: config.window_secs_ceil(),
            scope: config.scope,
        }
    }

    pub fn scope(&self) -> RateLimitScope {
        self.scope
    }

    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }

    /// Hits for `key` still inside the window ending at `now_ms`, oldest first.
    ///
    /// Read-only. A missing or unreadable record counts as no hits.
    pub async fn active_hits(&self, key: &str, now_ms: i64) -> Result<Vec<i64>, KvError> {
        let window_start = now_ms.saturating_sub(self.window_ms);

        let hits = match self.store.get(key).await? {
            Some(raw) => parse_record(key, &raw),
            None => Vec::new(),
        };

        Ok(hits.into_iter().filter(|&ts| ts > window_start).collect())
    }

    /// Decide whether the request at `now_ms` for `key` is admitted.
    ///
    /// Never fails: store errors are logged and answered with
    /// [`RateLimitDecision::FailedOpen`].
    pub async fn check(&self, key: &str, now_ms: i64) -> RateLimitDecision {
        let mut active = match self.active_hits(key, now_ms).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::error!("Rate limiter read failed for '{}': {}", key, e);
                return RateLimitDecision::FailedOpen;
            }
        };

        if active.len() >= self.max_requests as usize {
            let oldest = active[0];
            let closes_at = oldest.saturating_add(self.window_ms);
            let retry_after = ceil_secs(closes_at.saturating_sub(now_ms));
            tracing::debug!("Rate limit exceeded for '{}', retry in {}s", key, retry_after);

            return RateLimitDecision::Rejected {
                limit: self.max_requests,
                retry_after,
                reset_at: ceil_secs(closes_at),
            };
        }

        active.push(now_ms);

        if let Err(e) = self.persist(key, &active).await {
            tracing::error!("Rate limiter write failed for '{}': {}", key, e);
            return RateLimitDecision::FailedOpen;
        }

        RateLimitDecision::Admitted {
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(active.len() as u32),
            reset_at: ceil_secs(now_ms.saturating_add(self.window_ms)),
        }
    }

    /// Writes the whole filtered record back.
    ///
    /// The write runs on its own task so that a client hanging up mid-request
    /// does not cancel it halfway; the caller still waits for the outcome.
    async fn persist(&self, key: &str, hits: &[i64]) -> Result<(), KvError> {
        let payload = serde_json::to_string(hits)
            .map_err(|e| KvError::Unavailable(format!("failed to encode record: {}", e)))?;

        let store = Arc::clone(&self.store);
        let key = key.to_string();
        let expiration_secs = self.expiration_secs;

        tokio::spawn(async move { store.put(&key, &payload, Some(expiration_secs)).await })
            .await
            .map_err(|e| KvError::Unavailable(format!("write task aborted: {}", e)))?
    }
}

fn parse_record(key: &str, raw: &str) -> Vec<i64> {
    serde_json::from_str::<Vec<i64>>(raw).unwrap_or_else(|e| {
        tracing::warn!("Discarding malformed rate limit record '{}': {}", key, e);
        Vec::new()
    })
}

/// Milliseconds to whole seconds, rounding up; negative inputs clamp to zero.
fn ceil_secs(ms: i64) -> u64 {
    if ms <= 0 {
        return 0;
    }
    (ms as u64).div_ceil(1000)
}
