//! Unified error types for Gatehouse.
//!
//! These cover startup and CLI-surface failures: bad configuration,
//! unusable listen addresses, health probes that cannot reach the
//! server. The forwarding path itself never surfaces a typed error to
//! callers; any upstream failure collapses into a fixed `502 Bad
//! Gateway` response inside the handler.

/// Errors surfaced by the CLI, configuration loading, and the health
/// probe. Each variant renders a message suitable for direct terminal
/// output.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatehouseError {
    /// The configured origin could not be parsed as an absolute
    /// http(s) URL.
    #[error("Invalid origin URL '{url}': {reason}\n\n  Set --origin or PRIVATE_API_URL to an http:// or https:// base URL.")]
    InvalidOrigin { url: String, reason: String },

    /// The listen host/port pair did not parse as a socket address.
    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    /// A URI assembled for an internal request was malformed.
    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An internal HTTP request (the health probe) failed to complete.
    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Listener setup or other I/O failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The health endpoint answered with a non-success status.
    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}
