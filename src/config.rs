//! Proxy configuration.
//!
//! All runtime settings live in [`ProxyConfig`], built once at startup
//! from CLI flags and environment variables and injected into the
//! router as shared state. Handlers never read the environment.

use std::time::Duration;

use url::Url;

use crate::error::GatehouseError;

/// Origin used when neither `--origin` nor `PRIVATE_API_URL` is set.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Validated settings for the forwarding handler.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the upstream origin. Always an absolute http(s) URL
    /// with a host.
    pub origin: Url,
    /// Verify the origin's TLS certificate chain. Disabled only for
    /// origins with self-signed certificates.
    pub tls_verify: bool,
    /// Budget for connecting to the origin and receiving response
    /// headers. Body streaming is not bounded by this.
    pub timeout: Duration,
}

impl ProxyConfig {
    /// Parses and validates the origin, rejecting anything that is not
    /// an absolute http(s) URL with a host.
    pub fn new(origin: &str, tls_verify: bool, timeout: Duration) -> Result<Self, GatehouseError> {
        let parsed = Url::parse(origin).map_err(|e| GatehouseError::InvalidOrigin {
            url: origin.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatehouseError::InvalidOrigin {
                url: origin.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        if parsed.host_str().is_none() {
            return Err(GatehouseError::InvalidOrigin {
                url: origin.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            origin: parsed,
            tls_verify,
            timeout,
        })
    }

    /// The origin serialized without a trailing slash, ready to be
    /// joined with a captured path as `base + "/" + path`.
    pub fn origin_base(&self) -> &str {
        self.origin.as_str().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(origin: &str) -> Result<ProxyConfig, GatehouseError> {
        ProxyConfig::new(origin, true, Duration::from_secs(30))
    }

    #[test]
    fn accepts_http_origin() {
        let config = cfg("http://localhost:8080").unwrap();
        assert_eq!(config.origin_base(), "http://localhost:8080");
        assert!(config.tls_verify);
    }

    #[test]
    fn accepts_https_origin_with_path() {
        let config = cfg("https://api.internal/v1").unwrap();
        assert_eq!(config.origin_base(), "https://api.internal/v1");
    }

    #[test]
    fn trims_trailing_slash_from_origin_base() {
        let config = cfg("http://localhost:8080/").unwrap();
        assert_eq!(config.origin_base(), "http://localhost:8080");

        let config = cfg("https://api.internal/v1/").unwrap();
        assert_eq!(config.origin_base(), "https://api.internal/v1");
    }

    #[test]
    fn rejects_unsupported_scheme() {
        let err = cfg("ftp://files.internal").unwrap_err();
        assert!(matches!(err, GatehouseError::InvalidOrigin { .. }));
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn rejects_relative_origin() {
        assert!(cfg("/just/a/path").is_err());
        assert!(cfg("localhost:8080").is_err());
    }

    #[test]
    fn keeps_explicit_port() {
        let config = cfg("http://10.0.0.5:9000").unwrap();
        assert_eq!(config.origin.port(), Some(9000));
    }
}
