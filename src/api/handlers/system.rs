//! System health and status handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::Database;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
}

/// Paths of the resources this server exposes
#[derive(Serialize, ToSchema)]
pub struct EndpointIndex {
    #[schema(example = "/itineraries")]
    pub itineraries: String,
    #[schema(example = "/mcp")]
    pub mcp: String,
}

/// Welcome payload served at the root
#[derive(Serialize, ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Welcome to the Travel Itinerary API")]
    pub message: String,
    /// Present only when the OpenAPI UI is served
    #[schema(example = "/docs")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    pub endpoints: EndpointIndex,
}

/// Welcome endpoint
///
/// Lists the available endpoints
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse)
    )
)]
#[instrument(skip(state))]
pub async fn root<D: Database>(State(state): State<AppState<D>>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Travel Itinerary API".to_string(),
        docs: state.docs_enabled().then(|| "/docs".to_string()),
        endpoints: EndpointIndex {
            itineraries: "/itineraries".to_string(),
            mcp: "/mcp".to_string(),
        },
    })
}

/// Health check endpoint
///
/// Returns the current health status of the API
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
