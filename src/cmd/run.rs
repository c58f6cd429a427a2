//! `gatehouse run` — start the proxy server.
//!
//! Builds the [`ProxyConfig`] from CLI flags, constructs the shared
//! state and router, and serves with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cli::RunArgs;
use crate::config::ProxyConfig;
use crate::error::GatehouseError;
use crate::logging;
use crate::server::{self, AppState, Stats};

pub async fn execute(args: RunArgs) -> Result<(), GatehouseError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let config = ProxyConfig::new(
        &args.origin,
        !args.tls_no_verify,
        Duration::from_millis(args.timeout),
    )?;

    if !config.tls_verify {
        tracing::warn!("TLS certificate verification is disabled for the origin");
    }

    let state = Arc::new(AppState {
        http_client: server::build_http_client(config.tls_verify),
        config,
        start_time: Instant::now(),
        stats: Stats::new(),
    });

    let router = server::build_router(state.clone(), args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        origin = %state.config.origin,
        tls_verify = state.config.tls_verify,
        "gatehouse started"
    );

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(server::shutdown_signal())
    .await?;

    tracing::info!("gatehouse stopped");
    Ok(())
}
