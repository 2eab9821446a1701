//! MCP server implementation

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::db::Database;

/// Main MCP server
///
/// Generic over `D: Database` so tests can run the tools against an
/// in-memory database. Tool methods live in `mcp::tools`, one router per
/// entity, combined here.
pub struct McpServer<D: Database> {
    db: Arc<D>,
    tool_router: ToolRouter<Self>,
}

impl<D: Database> Clone for McpServer<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            tool_router: self.tool_router.clone(),
        }
    }
}

impl<D: Database + 'static> McpServer<D> {
    /// Create a new MCP server with the given database
    pub fn new(db: Arc<D>) -> Self {
        Self {
            db,
            tool_router: Self::itinerary_router(),
        }
    }

    /// Get the tool router
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    pub(crate) fn db(&self) -> &D {
        &self.db
    }
}

#[tool_handler(router = self.tool_router)]
impl<D: Database + 'static> ServerHandler for McpServer<D> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(
            "Travel itinerary server - browse itineraries by region, length and \
             recommendation, fetch full day-by-day details, and create new itineraries"
                .to_string(),
        );
        info
    }
}
