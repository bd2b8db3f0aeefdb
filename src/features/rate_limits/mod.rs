//! Sliding-window rate limiting for the JSON API.
//!
//! Every `/api/*` request is counted per client IP (optionally per route)
//! in the analytics KV namespace. Admitted responses carry quota headers;
//! rejected requests get a `429` with `Retry-After`.
//!
//! | Header | Meaning |
//! |--------|---------|
//! | `X-RateLimit-Limit` | Requests allowed per window |
//! | `X-RateLimit-Remaining` | Requests left in the current window |
//! | `X-RateLimit-Reset` | Unix seconds when the window frees up |
//! | `Retry-After` | Seconds to wait (429 only) |

pub mod middleware;
pub mod services;

pub use middleware::rate_limit_middleware;
pub use services::RateLimitService;
