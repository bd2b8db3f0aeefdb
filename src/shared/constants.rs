/// Default sliding window for API rate limiting (15 minutes)
pub const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 900_000;

/// Longest accepted rate limit window (one year)
pub const MAX_RATE_LIMIT_WINDOW_MS: u64 = 365 * 86_400_000;

/// Default number of admitted API requests per window
pub const DEFAULT_RATE_LIMIT_MAX: u32 = 100;

/// Default share of requests persisted as analytics records
pub const DEFAULT_ANALYTICS_SAMPLE_RATE: f64 = 0.1;

/// Sampled analytics records are kept for a week
pub const ANALYTICS_RECORD_TTL_SECS: u64 = 86_400 * 7;

/// Version reported by the root health endpoint
pub const SERVICE_VERSION: &str = "1.0.0";

/// Origins allowed by CORS when `CORS_ALLOWED_ORIGINS` is unset
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://myesimplus.com",
    "https://www.myesimplus.com",
    "https://myesimplus-com.advantec.workers.dev",
    "https://myesimplus-com-staging.advantec.workers.dev",
];

// =============================================================================
// KEY PREFIXES
// =============================================================================

pub const RATE_LIMIT_KEY_PREFIX: &str = "rate_limit";
pub const ANALYTICS_KEY_PREFIX: &str = "analytics";
pub const CONTACT_KEY_PREFIX: &str = "contact";
pub const INQUIRY_KEY_PREFIX: &str = "inquiry";
pub const NEWSLETTER_KEY_PREFIX: &str = "newsletter";

// =============================================================================
// CACHE POLICIES
// =============================================================================

pub const CACHE_IMMUTABLE_ASSET: &str = "public, max-age=31536000, immutable";
pub const CACHE_SHORT: &str = "public, max-age=300";
pub const CACHE_ONE_DAY: &str = "public, max-age=86400";

// =============================================================================
// CLIENT HEADERS
// =============================================================================

pub const HEADER_CONNECTING_IP: &str = "cf-connecting-ip";
pub const HEADER_FORWARDED_FOR: &str = "x-forwarded-for";
pub const HEADER_IP_COUNTRY: &str = "cf-ipcountry";
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// How often expired KV entries are purged
pub const KV_SWEEP_INTERVAL_SECS: u64 = 300;
