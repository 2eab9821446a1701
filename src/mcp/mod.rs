//! Model Context Protocol (MCP) server implementation
//!
//! Exposes the itinerary operations as MCP tools, served either over the
//! Streamable HTTP transport (nested into the API router at `/mcp`) or over
//! stdio.
//!
//! - **server**: `McpServer`, the `ServerHandler` holding the tool router
//! - **tools**: tool implementations, one module per entity
//! - **service**: Streamable HTTP service factory

pub mod server;
mod service;
pub mod tools;


pub use server::McpServer;
pub use service::create_mcp_service;
