//! Input sanitization and request-origin helpers shared by middleware and handlers.

use axum::http::HeaderMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::{HEADER_CONNECTING_IP, HEADER_FORWARDED_FOR, RATE_LIMIT_KEY_PREFIX};

lazy_static! {
    static ref SCRIPT_TAG: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    static ref JS_PROTOCOL: Regex = Regex::new(r"(?i)javascript:").unwrap();
    static ref EVENT_HANDLER: Regex = Regex::new(r"(?i)on\w+\s*=").unwrap();
}

/// Static response headers applied to every response
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    (
        "permissions-policy",
        "camera=(), microphone=(), geolocation=()",
    ),
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains; preload",
    ),
];

pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; \
script-src 'self' 'unsafe-inline'; \
img-src 'self' data: https:; \
connect-src 'self' https:; \
font-src 'self' https://fonts.gstatic.com; \
object-src 'none'; \
media-src 'self'; \
frame-src 'none'; \
base-uri 'self'; \
form-action 'self'";

/// Trims and strips script tags, `javascript:` URLs and inline event handlers.
pub fn sanitize_input(input: &str) -> String {
    let trimmed = input.trim();
    let without_scripts = SCRIPT_TAG.replace_all(trimmed, "");
    let without_protocol = JS_PROTOCOL.replace_all(&without_scripts, "");
    EVENT_HANDLER.replace_all(&without_protocol, "").into_owned()
}

pub fn sanitize_optional(input: Option<String>) -> Option<String> {
    input.map(|s| sanitize_input(&s))
}

/// Best-effort client address: edge-provided IP, then the first forwarded hop.
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(ip) = header_str(headers, HEADER_CONNECTING_IP) {
        return ip.to_string();
    }

    header_str(headers, HEADER_FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Reads a header as trimmed, non-empty text.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Counter key for a caller, optionally narrowed to one endpoint.
pub fn rate_limit_key(ip: &str, endpoint: Option<&str>) -> String {
    match endpoint {
        Some(endpoint) => format!("{}:{}:{}", RATE_LIMIT_KEY_PREFIX, ip, endpoint),
        None => format!("{}:{}", RATE_LIMIT_KEY_PREFIX, ip),
    }
}

/// Development origins are always accepted by CORS.
///
/// Only the exact hosts `localhost` and `127.0.0.1` count, on any port.
pub fn is_local_origin(origin: &str) -> bool {
    let Some((scheme, rest)) = origin.split_once("://") else {
        return false;
    };
    if scheme != "http" && scheme != "https" {
        return false;
    }

    let authority = rest.split('/').next().unwrap_or_default();
    let host = match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        Some(_) => return false,
        None => authority,
    };

    host.eq_ignore_ascii_case("localhost") || host == "127.0.0.1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_sanitize_input_strips_scripts_and_handlers() {
        assert_eq!(
            sanitize_input("  Hello <script>alert('x')</script>world "),
            "Hello world"
        );
        assert_eq!(
            sanitize_input("<a href=\"javascript:run()\">x</a>"),
            "<a href=\"run()\">x</a>"
        );
        assert_eq!(sanitize_input("<img onerror = \"x\">"), "<img  \"x\">");
    }

    #[test]
    fn test_sanitize_input_keeps_plain_text() {
        assert_eq!(
            sanitize_input("I need data in Japan next week."),
            "I need data in Japan next week."
        );
    }

    #[test]
    fn test_client_ip_prefers_connecting_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1, 10.0.0.2"));
        assert_eq!(client_ip(&headers), "10.0.0.1");

        headers.insert("cf-connecting-ip", HeaderValue::from_static("203.0.113.9"));
        assert_eq!(client_ip(&headers), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_unknown_without_headers() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn test_rate_limit_key() {
        assert_eq!(rate_limit_key("1.2.3.4", None), "rate_limit:1.2.3.4");
        assert_eq!(
            rate_limit_key("1.2.3.4", Some("/api/contact")),
            "rate_limit:1.2.3.4:/api/contact"
        );
    }

    #[test]
    fn test_is_local_origin() {
        assert!(is_local_origin("http://localhost:8787"));
        assert!(is_local_origin("http://127.0.0.1:3000"));
        assert!(is_local_origin("https://localhost"));
        assert!(!is_local_origin("https://evil.example"));
    }

    #[test]
    fn test_is_local_origin_rejects_lookalike_hosts() {
        assert!(!is_local_origin("https://localhost.evil.example"));
        assert!(!is_local_origin("https://127.0.0.1.attacker.net"));
        assert!(!is_local_origin("https://evil-localhost.example"));
        assert!(!is_local_origin("http://localhost@evil.example"));
        assert!(!is_local_origin("http://localhost:80.evil.example"));
        assert!(!is_local_origin("localhost:3000"));
        assert!(!is_local_origin("ftp://localhost"));
    }
}
