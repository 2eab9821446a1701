//! MCP Streamable HTTP service creation
//!
//! This module provides functions to create the MCP service
//! that can be integrated with an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::db::Database;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// The returned service implements `tower::Service` and can be nested into
/// an Axum router. Each MCP session gets its own `McpServer` sharing the
/// same database handle.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
///
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use travel_itinerary::db::SqliteDatabase;
/// # use travel_itinerary::mcp::create_mcp_service;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let db = SqliteDatabase::in_memory().await?;
///
/// let ct = CancellationToken::new();
/// let mcp_service = create_mcp_service(Arc::new(db), ct);
///
/// let app: Router = Router::new()
///     .nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<D: Database + 'static>(
    db: Arc<D>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<D>, LocalSessionManager> {
    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory =
        move || -> Result<McpServer<D>, std::io::Error> { Ok(McpServer::new(Arc::clone(&db))) };

    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;

    // Create service with local session manager
    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
