//! MCP tool implementations
//!
//! Tools are organized by entity type. Each module contributes a tool
//! router on `McpServer`.

mod itineraries;


use rmcp::ErrorData as McpError;
use serde::Serialize;

use crate::db::DbError;

pub use itineraries::{
    CreateItineraryDayParams, CreateItineraryParams, GetItinerariesParams, GetItineraryByIdParams,
};

/// Map a database error onto an MCP error.
///
/// Storage failures become internal errors; everything else (validation,
/// bad input) is reported as invalid parameters.
pub(crate) fn map_db_error(e: DbError) -> McpError {
    if e.is_storage_failure() {
        McpError::internal_error(e.to_string(), None)
    } else {
        McpError::invalid_params(e.to_string(), None)
    }
}

/// Serialize a tool result as pretty-printed JSON text.
pub(crate) fn to_json_text<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(serde_json::json!({"error": e.to_string()})),
        )
    })
}
