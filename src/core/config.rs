use std::env;
use std::time::Duration;

use crate::shared::constants::{
    DEFAULT_ALLOWED_ORIGINS, DEFAULT_ANALYTICS_SAMPLE_RATE, DEFAULT_RATE_LIMIT_MAX,
    DEFAULT_RATE_LIMIT_WINDOW_MS, MAX_RATE_LIMIT_WINDOW_MS,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub rate_limit: RateLimitConfig,
    pub analytics: AnalyticsConfig,
    pub kv: KvConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub environment: String,
    pub api_version: String,
}

/// Whether rate-limit buckets are shared across all API routes or kept per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitScope {
    Global,
    Endpoint,
}

/// Sliding-window parameters, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window_ms: u64,
    pub max_requests: u32,
    pub scope: RateLimitScope,
}

#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Probability in `[0, 1]` that a request is persisted to the store
    pub sample_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct KvConfig {
    pub backend: KvBackend,
    pub timeout: Duration,
    /// Only present for the postgres backend
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
            analytics: AnalyticsConfig::from_env()?,
            kv: KvConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Comma-separated; "*" mirrors any origin back
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origin_list(&raw))
            .unwrap_or_else(|_| {
                DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|o| o.to_string())
                    .collect()
            });

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let api_version = env::var("API_VERSION").unwrap_or_else(|_| "v1".to_string());

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            environment,
            api_version,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl RateLimitConfig {
    pub fn from_env() -> Result<Self, String> {
        let window_ms = parse_positive(
            "RATE_LIMIT_WINDOW",
            env::var("RATE_LIMIT_WINDOW").ok(),
            DEFAULT_RATE_LIMIT_WINDOW_MS,
        )?;
        let max_requests = parse_positive(
            "RATE_LIMIT_MAX",
            env::var("RATE_LIMIT_MAX").ok(),
            DEFAULT_RATE_LIMIT_MAX as u64,
        )?;
        let max_requests = u32::try_from(max_requests)
            .map_err(|_| "RATE_LIMIT_MAX is too large".to_string())?;

        let scope = match env::var("RATE_LIMIT_SCOPE")
            .unwrap_or_else(|_| "global".to_string())
            .to_lowercase()
            .as_str()
        {
            "global" => RateLimitScope::Global,
            "endpoint" => RateLimitScope::Endpoint,
            other => {
                return Err(format!(
                    "RATE_LIMIT_SCOPE must be 'global' or 'endpoint', got '{}'",
                    other
                ))
            }
        };

        Self::new(window_ms, max_requests, scope)
    }

    pub fn new(window_ms: u64, max_requests: u32, scope: RateLimitScope) -> Result<Self, String> {
        if window_ms == 0 {
            return Err("Rate limit window must be positive".to_string());
        }
        if window_ms > MAX_RATE_LIMIT_WINDOW_MS {
            return Err(format!(
                "Rate limit window must not exceed {}ms",
                MAX_RATE_LIMIT_WINDOW_MS
            ));
        }
        if max_requests == 0 {
            return Err("Rate limit max requests must be positive".to_string());
        }

        Ok(Self {
            window_ms,
            max_requests,
            scope,
        })
    }

    /// Store-side expiry for a counter record, rounded up to whole seconds.
    pub fn window_secs_ceil(&self) -> u64 {
        self.window_ms.div_ceil(1000)
    }
}

/// Parses a strictly positive integer setting, falling back to `default` when unset.
fn parse_positive(name: &str, raw: Option<String>, default: u64) -> Result<u64, String> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("{} must be a valid number", name))?;

    if value <= 0 {
        return Err(format!("{} must be greater than zero", name));
    }

    Ok(value as u64)
}

impl AnalyticsConfig {
    pub fn from_env() -> Result<Self, String> {
        let sample_rate = env::var("ANALYTICS_SAMPLE_RATE")
            .unwrap_or_else(|_| DEFAULT_ANALYTICS_SAMPLE_RATE.to_string())
            .parse::<f64>()
            .map_err(|_| "ANALYTICS_SAMPLE_RATE must be a valid number".to_string())?;

        if !(0.0..=1.0).contains(&sample_rate) {
            return Err("ANALYTICS_SAMPLE_RATE must be between 0 and 1".to_string());
        }

        Ok(Self { sample_rate })
    }
}

impl KvConfig {
    const DEFAULT_TIMEOUT_MS: u64 = 2000;

    pub fn from_env() -> Result<Self, String> {
        let backend = match env::var("KV_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => KvBackend::Memory,
            "postgres" => KvBackend::Postgres,
            other => {
                return Err(format!(
                    "KV_BACKEND must be 'memory' or 'postgres', got '{}'",
                    other
                ))
            }
        };

        let timeout_ms = parse_positive(
            "KV_TIMEOUT_MS",
            env::var("KV_TIMEOUT_MS").ok(),
            Self::DEFAULT_TIMEOUT_MS,
        )?;

        let database = match backend {
            KvBackend::Postgres => Some(DatabaseConfig::from_env()?),
            KvBackend::Memory => None,
        };

        Ok(Self {
            backend,
            timeout: Duration::from_millis(timeout_ms),
            database,
        })
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set when KV_BACKEND=postgres".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "MyeSIMPlus API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "1.0.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Plan catalog and customer intake API for MyeSIMPlus".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
