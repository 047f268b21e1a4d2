use axum::http::{HeaderName, HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Response headers browsers may read on cross-origin list responses.
pub const EXPOSED_HEADERS: [&str; 5] = [
    "x-pagination-total-count",
    "x-pagination-page-count",
    "x-pagination-current-page",
    "x-pagination-per-page",
    "link",
];

/// Parses a comma-separated origin list such as
/// `http://localhost:3000,https://shop.example.com`.
///
/// Blank entries are skipped; an empty result is an error.
pub fn parse_allowed_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    Ok(origins)
}

/// Creates a CORS layer for read-only APIs.
///
/// - Methods: GET, HEAD, OPTIONS
/// - Headers: Content-Type, Authorization, Accept
/// - Pagination and `Link` headers exposed to scripts
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .expose_headers(EXPOSED_HEADERS.map(HeaderName::from_static))
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins_skips_blank_entries() {
        let origins = parse_allowed_origins("http://localhost:3000, ,https://example.com").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://example.com");
    }

    #[test]
    fn test_parse_allowed_origins_rejects_empty() {
        let err = parse_allowed_origins(" , ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
