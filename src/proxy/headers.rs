//! Header rewriting for both directions of the relay.
//!
//! Outbound, [`build_outbound_headers`] forwards the client's headers
//! wholesale, minus hop-by-hop headers, with `Host` rewritten to the
//! origin and `Origin` removed so the request reads as first-party.
//! The request body is buffered and re-framed, so a stale
//! `content-length` is dropped too. Inbound,
//! [`strip_response_headers`] removes hop-by-hop headers and the
//! browser policy headers the origin sets for direct consumption.

use std::sync::LazyLock;

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use url::Url;

static HOP_BY_HOP: LazyLock<Vec<HeaderName>> = LazyLock::new(|| {
    [
        "connection",
        "keep-alive",
        "transfer-encoding",
        "te",
        "trailer",
        "upgrade",
        "proxy-authorization",
        "proxy-authenticate",
    ]
    .iter()
    .filter_map(|name| name.parse::<HeaderName>().ok())
    .collect()
});

/// Response headers never forwarded to the client. These carry browser
/// policies scoped to the origin's own pages, not to pages served from
/// behind the relay.
const RESPONSE_DENYLIST: [&str; 3] = [
    "content-security-policy",
    "content-security-policy-report-only",
    "x-frame-options",
];

/// `host` or `host:port` for the origin, with default ports omitted.
#[must_use]
pub fn host_header_value(origin: &Url) -> Option<HeaderValue> {
    let host = origin.host_str()?;
    let value = origin
        .port()
        .map_or_else(|| host.to_string(), |port| format!("{host}:{port}"));
    HeaderValue::from_str(&value).ok()
}

#[must_use]
pub fn build_outbound_headers(original: &HeaderMap, origin: &Url) -> HeaderMap {
    let mut headers = original.clone();

    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.remove(header::CONTENT_LENGTH);

    if let Some(host) = host_header_value(origin) {
        headers.insert(header::HOST, host);
    }
    headers.remove(header::ORIGIN);

    headers
}

pub fn strip_response_headers(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    for name in RESPONSE_DENYLIST {
        headers.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn strips_hop_by_hop() {
        let mut original = HeaderMap::new();
        original.insert("connection", "keep-alive".parse().unwrap());
        original.insert("te", "trailers".parse().unwrap());
        original.insert("content-type", "application/json".parse().unwrap());

        let result = build_outbound_headers(&original, &origin("http://backend:9090"));

        assert!(result.get("connection").is_none());
        assert!(result.get("te").is_none());
        assert!(result.get("content-type").is_some());
    }

    #[test]
    fn rewrites_host() {
        let mut original = HeaderMap::new();
        original.insert("host", "proxy.example.com".parse().unwrap());

        let result = build_outbound_headers(&original, &origin("http://backend:9090"));

        assert_eq!(result.get("host").unwrap(), "backend:9090");
    }

    #[test]
    fn host_omits_default_ports() {
        assert_eq!(
            host_header_value(&origin("https://api.internal:443")).unwrap(),
            "api.internal"
        );
        assert_eq!(
            host_header_value(&origin("http://api.internal:80")).unwrap(),
            "api.internal"
        );
        assert_eq!(
            host_header_value(&origin("http://localhost:8080")).unwrap(),
            "localhost:8080"
        );
    }

    #[test]
    fn removes_origin_header() {
        let mut original = HeaderMap::new();
        original.insert("origin", "https://app.example.com".parse().unwrap());
        original.insert("referer", "https://app.example.com/page".parse().unwrap());

        let result = build_outbound_headers(&original, &origin("http://backend:9090"));

        assert!(result.get("origin").is_none());
        assert!(result.get("referer").is_some());
    }

    #[test]
    fn drops_stale_content_length() {
        let mut original = HeaderMap::new();
        original.insert("content-length", "42".parse().unwrap());

        let result = build_outbound_headers(&original, &origin("http://backend:9090"));

        assert!(result.get("content-length").is_none());
    }

    #[test]
    fn forwards_auth_and_cookies() {
        let mut original = HeaderMap::new();
        original.insert("authorization", "Bearer tok".parse().unwrap());
        original.insert("cookie", "session=1".parse().unwrap());

        let result = build_outbound_headers(&original, &origin("http://backend:9090"));

        assert_eq!(result.get("authorization").unwrap(), "Bearer tok");
        assert_eq!(result.get("cookie").unwrap(), "session=1");
    }

    #[test]
    fn strips_browser_policy_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("content-security-policy", "default-src 'self'".parse().unwrap());
        headers.insert("content-security-policy-report-only", "default-src 'self'".parse().unwrap());
        headers.insert("x-frame-options", "DENY".parse().unwrap());
        headers.insert("content-type", "text/html".parse().unwrap());
        headers.insert("set-cookie", "a=1".parse().unwrap());

        strip_response_headers(&mut headers);

        assert!(headers.get("content-security-policy").is_none());
        assert!(headers.get("content-security-policy-report-only").is_none());
        assert!(headers.get("x-frame-options").is_none());
        assert!(headers.get("content-type").is_some());
        assert!(headers.get("set-cookie").is_some());
    }

    #[test]
    fn keeps_response_content_length() {
        let mut headers = HeaderMap::new();
        headers.insert("content-length", "1024".parse().unwrap());
        headers.insert("transfer-encoding", "chunked".parse().unwrap());

        strip_response_headers(&mut headers);

        assert_eq!(headers.get("content-length").unwrap(), "1024");
        assert!(headers.get("transfer-encoding").is_none());
    }
}
