//! Itinerary handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::db::{
    CreatedItinerary, DEFAULT_LIST_LIMIT, Database, DbError, Id, ItineraryDetail, ItineraryQuery,
    ItineraryRepository, ItinerarySummary, NewItinerary,
};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Error response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Itinerary '42' not found")]
    pub error: String,
}

impl ErrorResponse {
    fn with_status(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                error: error.into(),
            }),
        )
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListItinerariesQuery {
    /// Number of items to skip
    #[param(example = 0)]
    pub skip: Option<usize>,
    /// Maximum number of items to return (default 100)
    #[param(example = 100)]
    pub limit: Option<usize>,
    /// Exact region match
    #[param(example = "Phuket")]
    pub region: Option<String>,
    /// Minimum number of nights (inclusive)
    #[param(example = 3)]
    pub min_nights: Option<i64>,
    /// Maximum number of nights (inclusive)
    #[param(example = 7)]
    pub max_nights: Option<i64>,
    /// Only recommended (true or 1) or only non-recommended (false or 0) itineraries
    #[serde(default, deserialize_with = "crate::serde_utils::opt_bool_or_int")]
    pub recommended: Option<bool>,
}

impl From<ListItinerariesQuery> for ItineraryQuery {
    fn from(q: ListItinerariesQuery) -> Self {
        Self {
            region: q.region,
            min_nights: q.min_nights,
            max_nights: q.max_nights,
            recommended: q.recommended,
            skip: q.skip.unwrap_or(0),
            limit: q.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List itineraries
///
/// Returns itinerary summaries ordered by id, optionally filtered
#[utoipa::path(
    get,
    path = "/itineraries",
    tag = "itineraries",
    params(ListItinerariesQuery),
    responses(
        (status = 200, description = "List of itineraries", body = Vec<ItinerarySummary>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_itineraries<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<ListItinerariesQuery>, QueryRejection>,
) -> Result<Json<Vec<ItinerarySummary>>, (StatusCode, Json<ErrorResponse>)> {
    let Query(query) = query.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected itinerary query");
        ErrorResponse::with_status(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;
    let query = ItineraryQuery::from(query);

    let itineraries = state
        .db()
        .itineraries()
        .list(&query)
        .await
        .map_err(|e| ErrorResponse::with_status(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(itineraries))
}

/// Get an itinerary by ID
///
/// Returns the itinerary with its days, transfers, hotel stays and activities
#[utoipa::path(
    get,
    path = "/itineraries/{id}",
    tag = "itineraries",
    params(
        ("id" = i64, Path, description = "Itinerary ID")
    ),
    responses(
        (status = 200, description = "Itinerary found", body = ItineraryDetail),
        (status = 404, description = "Itinerary not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_itinerary<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<Json<ItineraryDetail>, (StatusCode, Json<ErrorResponse>)> {
    let itinerary = state
        .db()
        .itineraries()
        .get(id)
        .await
        .map_err(|e| match e {
            DbError::NotFound { .. } => ErrorResponse::with_status(
                StatusCode::NOT_FOUND,
                format!("Itinerary '{}' not found", id),
            ),
            _ => ErrorResponse::with_status(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok(Json(itinerary))
}

/// Create a new itinerary
///
/// Creates the itinerary with all of its days in one transaction. Activity
/// ids that match no activity are skipped and listed in
/// `ignored_activity_ids`.
#[utoipa::path(
    post,
    path = "/itineraries",
    tag = "itineraries",
    request_body = NewItinerary,
    responses(
        (status = 201, description = "Itinerary created", body = CreatedItinerary),
        (status = 400, description = "Invalid itinerary payload", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_itinerary<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<NewItinerary>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedItinerary>), (StatusCode, Json<ErrorResponse>)> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected itinerary payload");
        ErrorResponse::with_status(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let created = state
        .db()
        .itineraries()
        .create(&payload)
        .await
        .map_err(|e| {
            let status = if e.is_storage_failure() {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::BAD_REQUEST
            };
            ErrorResponse::with_status(status, format!("Failed to create itinerary: {}", e))
        })?;

    Ok((StatusCode::CREATED, Json(created)))
}
