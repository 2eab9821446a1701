//! MCP command - serves the itinerary tools over stdio

use std::path::Path;
use std::sync::Arc;

use miette::{IntoDiagnostic, Result};
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::serve::open_database;
use crate::api::log_filter;
use crate::mcp::McpServer;

/// Run the MCP server on stdin/stdout until the client disconnects
pub async fn run(db_path: &Path, verbosity: u8, seed: bool) -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    let _ = tracing_subscriber::registry()
        .with(log_filter(verbosity))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    let db = open_database(db_path, seed).await?;
    info!(db = %db_path.display(), "starting MCP server on stdio");

    let service = McpServer::new(Arc::new(db))
        .serve(stdio())
        .await
        .into_diagnostic()?;

    let reason = service.waiting().await.into_diagnostic()?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
