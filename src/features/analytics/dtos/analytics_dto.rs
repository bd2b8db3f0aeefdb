use axum::http::{header, HeaderMap, Method, Uri};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::constants::{HEADER_IP_COUNTRY, HEADER_REQUEST_ID};
use crate::shared::security::{client_ip, header_str};

/// What is known about a request before its handler runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    pub request_id: String,
    /// Milliseconds since epoch
    pub timestamp: i64,
    pub method: String,
    pub url: String,
    pub user_agent: String,
    pub ip: String,
    pub country: String,
    pub referer: String,
}

impl RequestMetadata {
    pub fn capture(method: &Method, uri: &Uri, headers: &HeaderMap, at: DateTime<Utc>) -> Self {
        let request_id = header_str(headers, HEADER_REQUEST_ID)
            .map(|id| id.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            request_id,
            timestamp: at.timestamp_millis(),
            method: method.to_string(),
            url: uri.to_string(),
            user_agent: header_str(headers, header::USER_AGENT.as_str())
                .unwrap_or("unknown")
                .to_string(),
            ip: client_ip(headers),
            country: header_str(headers, HEADER_IP_COUNTRY)
                .unwrap_or("unknown")
                .to_string(),
            referer: header_str(headers, header::REFERER.as_str())
                .unwrap_or("direct")
                .to_string(),
        }
    }
}

/// Persisted sample: request metadata plus its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRecord {
    #[serde(flatten)]
    pub metadata: RequestMetadata,
    pub status: u16,
    /// Milliseconds spent in the handler stack
    pub duration: u64,
    pub success: bool,
}

impl AnalyticsRecord {
    pub fn new(metadata: RequestMetadata, status: u16, duration: u64) -> Self {
        Self {
            metadata,
            status,
            duration,
            success: status < 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    #[test]
    fn test_capture_defaults() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let meta = RequestMetadata::capture(
            &Method::GET,
            &Uri::from_static("/api/plans?x=1"),
            &HeaderMap::new(),
            at,
        );

        assert_eq!(meta.method, "GET");
        assert_eq!(meta.url, "/api/plans?x=1");
        assert_eq!(meta.user_agent, "unknown");
        assert_eq!(meta.ip, "unknown");
        assert_eq!(meta.country, "unknown");
        assert_eq!(meta.referer, "direct");
        assert_eq!(meta.timestamp, at.timestamp_millis());
        assert!(Uuid::parse_str(&meta.request_id).is_ok());
    }

    #[test]
    fn test_capture_reads_edge_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-123"));
        headers.insert("cf-ipcountry", HeaderValue::from_static("JP"));
        headers.insert("referer", HeaderValue::from_static("https://google.com"));
        headers.insert("user-agent", HeaderValue::from_static("curl/8.0"));

        let meta = RequestMetadata::capture(
            &Method::POST,
            &Uri::from_static("/api/contact"),
            &headers,
            Utc::now(),
        );

        assert_eq!(meta.request_id, "req-123");
        assert_eq!(meta.country, "JP");
        assert_eq!(meta.referer, "https://google.com");
        assert_eq!(meta.user_agent, "curl/8.0");
    }

    #[test]
    fn test_record_serializes_flat_camel_case() {
        let meta = RequestMetadata::capture(
            &Method::GET,
            &Uri::from_static("/"),
            &HeaderMap::new(),
            Utc::now(),
        );
        let json = serde_json::to_value(AnalyticsRecord::new(meta, 503, 12)).unwrap();

        assert_eq!(json["status"], 503);
        assert_eq!(json["success"], false);
        assert_eq!(json["userAgent"], "unknown");
        assert!(json.get("requestId").is_some());
    }
}
