//! Transport runtime shared by the server binaries.
//!
//! HTTP mode serves an MCP router through axum, stdio mode hands the
//! process's stdin and stdout to rmcp.

mod error;


use std::net::{IpAddr, SocketAddr};

use axum::{Json, Router, routing::get};
use rmcp::{ServerHandler, ServiceExt, transport::stdio};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::TransportArgs;

pub use error::{ServerError, ServerResult};

/// HTTP server configuration
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
        }
    }
}

impl From<&TransportArgs> for Config {
    fn from(args: &TransportArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Output goes to stderr in every
/// mode since stdout carries the protocol in stdio mode.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

/// Add the health endpoint and request tracing to an MCP router.
pub fn app(router: Router) -> Router {
    router
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
}

/// Serve `router` until Ctrl-C or until `ct` is cancelled.
///
/// Cancelling `ct` also closes the open MCP sessions, so the token given to
/// the service must be the same one.
pub async fn run(config: Config, router: Router, ct: CancellationToken) -> ServerResult<()> {
    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MCP server listening on http://{}/mcp", listener.local_addr()?);

    let shutdown = ct.clone();
    axum::serve(listener, app(router))
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("Received Ctrl-C, shutting down"),
                _ = shutdown.cancelled() => {}
            }
            shutdown.cancel();
        })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Serve one MCP session over stdin and stdout until the client
/// disconnects or Ctrl-C arrives.
pub async fn run_stdio<S: ServerHandler>(server: S) -> ServerResult<()> {
    info!("MCP server running on stdio");

    let service = server
        .serve(stdio())
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;

    tokio::select! {
        result = service.waiting() => {
            let reason = result.map_err(|e| ServerError::Transport(e.to_string()))?;
            info!(?reason, "MCP session closed");
        }
        _ = tokio::signal::ctrl_c() => info!("Received Ctrl-C, shutting down"),
    }

    Ok(())
}
