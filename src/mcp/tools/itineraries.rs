//! Itinerary tool implementations
//!
//! Mirrors the HTTP itinerary endpoints: same parameters, same result shapes.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::db::{
    DEFAULT_LIST_LIMIT, Database, DbError, Id, ItineraryQuery, ItineraryRepository, NewItinerary,
    NewItineraryDay,
};
use crate::mcp::McpServer;
use crate::mcp::tools::{map_db_error, to_json_text};

// Parameter types for tools
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetItinerariesParams {
    #[schemars(description = "Exact region match, e.g. 'Phuket' or 'Krabi'")]
    pub region: Option<String>,
    #[schemars(description = "Minimum number of nights (inclusive)")]
    pub min_nights: Option<i64>,
    #[schemars(description = "Maximum number of nights (inclusive)")]
    pub max_nights: Option<i64>,
    #[schemars(
        description = "true (or 1) for recommended itineraries only, false (or 0) for non-recommended only",
        with = "Option<bool>"
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::opt_bool_or_int")]
    pub recommended: Option<bool>,
    #[schemars(description = "Number of itineraries to skip (default: 0)")]
    pub skip: Option<usize>,
    #[schemars(description = "Maximum number of itineraries to return (default: 100)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetItineraryByIdParams {
    #[schemars(description = "Itinerary ID")]
    pub itinerary_id: Id,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateItineraryDayParams {
    #[schemars(description = "Day number, starting at 1")]
    pub day_number: i64,
    #[schemars(description = "Transfer taken on this day (optional)")]
    pub transfer_id: Option<Id>,
    #[schemars(description = "Hotel for the night")]
    pub hotel_id: Id,
    #[schemars(description = "Activities for the day; unknown ids are skipped")]
    #[serde(default)]
    pub activity_ids: Vec<Id>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateItineraryParams {
    #[schemars(description = "Itinerary name")]
    pub name: String,
    #[schemars(description = "Free-form description")]
    pub description: Option<String>,
    #[schemars(description = "Region, e.g. 'Phuket'")]
    pub region: String,
    #[schemars(description = "Number of nights")]
    pub duration_nights: i64,
    #[schemars(description = "Mark as recommended (default: false)", with = "bool")]
    #[serde(default, deserialize_with = "crate::serde_utils::bool_or_int")]
    pub is_recommended: bool,
    #[schemars(description = "Days in order; each needs a hotel")]
    pub days: Vec<CreateItineraryDayParams>,
}

impl From<GetItinerariesParams> for ItineraryQuery {
    fn from(p: GetItinerariesParams) -> Self {
        Self {
            region: p.region,
            min_nights: p.min_nights,
            max_nights: p.max_nights,
            recommended: p.recommended,
            skip: p.skip.unwrap_or(0),
            limit: p.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        }
    }
}

impl From<CreateItineraryParams> for NewItinerary {
    fn from(p: CreateItineraryParams) -> Self {
        Self {
            name: p.name,
            description: p.description,
            region: p.region,
            duration_nights: p.duration_nights,
            is_recommended: p.is_recommended,
            days: p
                .days
                .into_iter()
                .map(|d| NewItineraryDay {
                    day_number: d.day_number,
                    transfer_id: d.transfer_id,
                    hotel_id: d.hotel_id,
                    activity_ids: d.activity_ids,
                })
                .collect(),
        }
    }
}

#[tool_router(router = itinerary_router, vis = "pub(crate)")]
impl<D: Database + 'static> McpServer<D> {
    /// List itinerary summaries with optional filters
    #[tool(
        description = "List itineraries ordered by id. Filter by region, min_nights/max_nights (inclusive) and recommended flag. Paginate with skip/limit (default limit: 100)."
    )]
    pub async fn get_itineraries(
        &self,
        params: Parameters<GetItinerariesParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = ItineraryQuery::from(params.0);

        let itineraries = self
            .db()
            .itineraries()
            .list(&query)
            .await
            .map_err(map_db_error)?;

        Ok(CallToolResult::success(vec![Content::text(to_json_text(
            &itineraries,
        )?)]))
    }

    /// Get an itinerary with all of its days
    #[tool(
        description = "Get one itinerary with its days, transfers, hotel stays and activities. Returns null when no itinerary has this id."
    )]
    pub async fn get_itinerary_by_id(
        &self,
        params: Parameters<GetItineraryByIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let itinerary = match self.db().itineraries().get(params.0.itinerary_id).await {
            Ok(itinerary) => Some(itinerary),
            Err(DbError::NotFound { .. }) => None,
            Err(e) => return Err(map_db_error(e)),
        };

        Ok(CallToolResult::success(vec![Content::text(to_json_text(
            &itinerary,
        )?)]))
    }

    /// Create an itinerary with its days
    #[tool(
        description = "Create an itinerary with its days in one step. Each day needs a hotel_id; transfer_id and activity_ids are optional. Unknown activity ids are skipped and listed in ignored_activity_ids."
    )]
    pub async fn create_itinerary(
        &self,
        params: Parameters<CreateItineraryParams>,
    ) -> Result<CallToolResult, McpError> {
        let itinerary = NewItinerary::from(params.0);

        let created = self
            .db()
            .itineraries()
            .create(&itinerary)
            .await
            .map_err(map_db_error)?;

        Ok(CallToolResult::success(vec![Content::text(to_json_text(
            &created,
        )?)]))
    }
}
