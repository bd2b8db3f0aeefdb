//! Request analytics.
//!
//! Every request produces one structured `analytics` tracing event. A random
//! sample of requests is also persisted to the analytics KV namespace under
//! `analytics:{YYYY-MM-DD}:{requestId}` for a week. Persisting is
//! fire-and-forget and never delays or alters the response.

pub mod dtos;
pub mod middleware;
pub mod services;

pub use middleware::analytics_middleware;
pub use services::AnalyticsService;
