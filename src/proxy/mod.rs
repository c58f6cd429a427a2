//! Core HTTP request forwarding handler.
//!
//! [`forward_handler`] receives every request under [`MOUNT`], rewrites
//! it for the configured origin, relays it without following
//! redirects, and streams the origin's response back unchanged.
//! Submodules handle target URL assembly ([`target`]) and header
//! rewriting ([`headers`]).

pub mod headers;
pub mod target;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodFilter;
use http_body_util::{BodyExt, Full};

use crate::server::AppState;

/// Path prefix the forwarding handler is mounted under.
pub const MOUNT: &str = "/gw";

/// Verb set accepted under [`MOUNT`]. Anything else (`TRACE`,
/// `CONNECT`) gets a 405 from the router.
pub const FORWARD_METHODS: MethodFilter = MethodFilter::GET
    .or(MethodFilter::HEAD)
    .or(MethodFilter::POST)
    .or(MethodFilter::PUT)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::DELETE)
    .or(MethodFilter::OPTIONS);

pub async fn forward_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    req_headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path();
    let target = target::target_url(
        state.config.origin_base(),
        target::forward_path(path),
        uri.query(),
    );

    tracing::debug!(method = %method, path = %path, target = %target, "forwarding request");
    let started = std::time::Instant::now();

    let outbound = headers::build_outbound_headers(&req_headers, &state.config.origin);

    // GET and HEAD are relayed without a body, everything else carries
    // the buffered client body.
    let request_body = if matches!(method, Method::GET | Method::HEAD) {
        Full::default()
    } else {
        Full::from(body)
    };

    let mut request = match hyper::Request::builder()
        .method(method.clone())
        .uri(&target)
        .body(request_body)
    {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(method = %method, path = %path, error = %e, "failed to build origin request");
            state.stats.failed.fetch_add(1, Ordering::Relaxed);
            return bad_gateway();
        }
    };
    *request.headers_mut() = outbound;

    let result = tokio::time::timeout(state.config.timeout, state.http_client.request(request));
    let response = match result.await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            tracing::error!(method = %method, path = %path, error = %e, "origin request failed");
            state.stats.failed.fetch_add(1, Ordering::Relaxed);
            return bad_gateway();
        }
        Err(_) => {
            tracing::error!(
                method = %method,
                path = %path,
                timeout = ?state.config.timeout,
                "origin request timed out"
            );
            state.stats.failed.fetch_add(1, Ordering::Relaxed);
            return bad_gateway();
        }
    };

    state.stats.forwarded.fetch_add(1, Ordering::Relaxed);
    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status(),
        latency_ms = started.elapsed().as_millis() as u64,
        "origin responded"
    );

    // Status and remaining headers pass through verbatim; the body is
    // streamed, not buffered.
    let (mut parts, incoming) = response.into_parts();
    headers::strip_response_headers(&mut parts.headers);

    // A transport error mid-stream cannot become a 502 anymore; the
    // status line is already on the wire. Log it and let the
    // connection drop.
    let relay = incoming.map_err(|e| {
        tracing::warn!(error = %e, "origin response stream error");
        e
    });
    Response::from_parts(parts, Body::new(relay))
}

/// Fixed failure response. Origin error detail stays in the logs, never
/// in what the client sees.
fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
}
