//! Gatehouse is a forwarding proxy for a private HTTP origin.
//!
//! It receives incoming HTTP requests under a wildcard mount, rewrites
//! them for a single configured backend origin, relays them without
//! following redirects, and streams each response back to the caller
//! with a fixed set of browser policy headers removed. Any failure to
//! complete an exchange collapses into a plain `502 Bad Gateway`.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`config`] -- The [`ProxyConfig`](config::ProxyConfig) struct, built
//!   once at startup and injected into the handler.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler returning runtime
//!   diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print
//!   output.
//! - [`middleware`] -- Tower middleware; bridges the `token` cookie to
//!   bearer auth.
//! - [`proxy`] -- Core HTTP forwarding: target URL assembly, header
//!   rewriting, and the relay handler itself.
//! - [`server`] -- Axum server setup, shared application state, HTTP
//!   client, and graceful shutdown.
//! - [`tls`] -- Origin TLS verification toggle for self-signed dev
//!   certificates.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod proxy;
pub mod server;
pub mod tls;
