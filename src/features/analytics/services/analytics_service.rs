use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::features::analytics::dtos::AnalyticsRecord;
use crate::modules::kv::KvStore;
use crate::shared::constants::{ANALYTICS_KEY_PREFIX, ANALYTICS_RECORD_TTL_SECS};

/// Samples requests and persists the chosen ones in the background
pub struct AnalyticsService {
    store: Arc<dyn KvStore>,
    sample_rate: f64,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn KvStore>, sample_rate: f64) -> Self {
        Self { store, sample_rate }
    }

    /// Independent uniform draw per call
    pub fn should_sample(&self) -> bool {
        rand::random::<f64>() < self.sample_rate
    }

    pub fn record_key(record: &AnalyticsRecord) -> String {
        let day = DateTime::<Utc>::from_timestamp_millis(record.metadata.timestamp)
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%d");

        format!(
            "{}:{}:{}",
            ANALYTICS_KEY_PREFIX, day, record.metadata.request_id
        )
    }

    /// Writes `record` on a detached task.
    ///
    /// Failures are logged and go no further. The handle is only useful to
    /// callers that want to wait, such as tests.
    pub fn record_detached(&self, record: AnalyticsRecord) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);

        tokio::spawn(async move {
            let key = Self::record_key(&record);
            let payload = match serde_json::to_string(&record) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!("Failed to encode analytics record '{}': {}", key, e);
                    return;
                }
            };

            if let Err(e) = store
                .put(&key, &payload, Some(ANALYTICS_RECORD_TTL_SECS))
                .await
            {
                tracing::error!("Failed to store analytics record '{}': {}", key, e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::analytics::dtos::RequestMetadata;
    use crate::shared::test_helpers::{FailingKvStore, RecordingKvStore};
    use axum::http::{HeaderMap, HeaderValue, Method, Uri};
    use chrono::TimeZone;

    fn record(request_id: &'static str) -> AnalyticsRecord {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static(request_id));
        let at = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap();
        let meta = RequestMetadata::capture(&Method::GET, &Uri::from_static("/"), &headers, at);
        AnalyticsRecord::new(meta, 200, 4)
    }

    #[test]
    fn test_sampling_extremes() {
        let store = Arc::new(RecordingKvStore::new());
        let never = AnalyticsService::new(store.clone(), 0.0);
        let always = AnalyticsService::new(store, 1.0);

        for _ in 0..200 {
            assert!(!never.should_sample());
            assert!(always.should_sample());
        }
    }

    #[test]
    fn test_record_key_is_date_and_request_scoped() {
        assert_eq!(
            AnalyticsService::record_key(&record("abc")),
            "analytics:2025-06-30:abc"
        );
    }

    #[tokio::test]
    async fn test_record_detached_writes_with_week_ttl() {
        let store = Arc::new(RecordingKvStore::new());
        let service = AnalyticsService::new(store.clone(), 1.0);

        service.record_detached(record("r1")).await.unwrap();

        assert_eq!(
            store.puts(),
            vec![(
                "analytics:2025-06-30:r1".to_string(),
                Some(ANALYTICS_RECORD_TTL_SECS)
            )]
        );
        let stored = store.get("analytics:2025-06-30:r1").await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["requestId"], "r1");
    }

    #[tokio::test]
    async fn test_record_detached_swallows_store_failure() {
        let service = AnalyticsService::new(Arc::new(FailingKvStore::writes()), 1.0);

        // The task completes normally even though the write failed
        assert!(service.record_detached(record("r2")).await.is_ok());
    }
}
