//! Liveness endpoints.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/health` | Service status, environment and uptime |
//! | GET | `/api/health` | API status (subject to API rate limiting) |

pub mod dtos;
pub mod handlers;
pub mod routes;

use std::time::Instant;

/// Process-level facts reported by the health endpoints
pub struct HealthState {
    pub started_at: Instant,
    pub environment: String,
    pub api_version: String,
}

impl HealthState {
    pub fn new(environment: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            started_at: Instant::now(),
            environment: environment.into(),
            api_version: api_version.into(),
        }
    }
}
