//! HTTP API server.
//!
//! Serves the itinerary REST endpoints, the MCP Streamable HTTP endpoint at
//! `/mcp` and (optionally) the OpenAPI UI at `/docs`.

mod handlers;
pub mod routes;
mod state;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::Router;
use miette::Diagnostic;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::mcp::create_mcp_service;

pub use handlers::{ErrorResponse, HealthResponse, ListItinerariesQuery, WelcomeResponse};
pub use state::AppState;

/// Default port for the API server
pub const DEFAULT_PORT: u16 = 3737;

/// API server errors
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind to {addr}: {source}")]
    #[diagnostic(
        code(itinerary::api::bind),
        help("Is another process already listening on this port?")
    )]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(itinerary::api::server))]
    Server(#[source] std::io::Error),
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log verbosity (0 = info, 1 = debug, 2 = debug incl. HTTP, 3+ = trace)
    pub verbosity: u8,
    /// Serve the OpenAPI UI at /docs
    pub enable_docs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            verbosity: 0,
            enable_docs: false,
        }
    }
}

/// Log filter for the given verbosity, unless RUST_LOG is set.
pub fn log_filter(verbosity: u8) -> EnvFilter {
    let default = match verbosity {
        0 => "travel_itinerary=info,tower_http=warn",
        1 => "travel_itinerary=debug,tower_http=info",
        2 => "travel_itinerary=debug,tower_http=debug",
        _ => "travel_itinerary=trace,tower_http=trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Initialize tracing subscriber with env filter
fn init_tracing(verbosity: u8) {
    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(log_filter(verbosity))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Build the full application: REST routes, MCP endpoint and HTTP layers.
pub fn create_app<D: Database + 'static>(
    db: D,
    enable_docs: bool,
    cancellation_token: CancellationToken,
) -> Router {
    let state = AppState::new(db);
    let mcp_service = create_mcp_service(state.db_arc(), cancellation_token);

    routes::create_router(state, enable_docs)
        .nest_service("/mcp", mcp_service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Run the API server with the given configuration until Ctrl-C.
pub async fn run<D: Database + 'static>(config: Config, db: D) -> Result<(), ApiError> {
    init_tracing(config.verbosity);

    let ct = CancellationToken::new();
    let app = create_app(db, config.enable_docs, ct.clone());

    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;
    info!("API server listening on http://{}", addr);
    if config.enable_docs {
        info!("API docs available at http://{}/docs", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ct))
        .await
        .map_err(ApiError::Server)?;

    info!("API server stopped");
    Ok(())
}

/// Resolve on Ctrl-C and cancel the MCP sessions.
async fn shutdown_signal(ct: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler, keep serving until the token is cancelled elsewhere
        ct.cancelled().await;
        return;
    }
    info!("shutting down");
    ct.cancel();
}
