//! Domain models for the itinerary database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Integer primary key used for all entities.
pub type Id = i64;

// =============================================================================
// Query Types
// =============================================================================

/// Default page size for itinerary listings.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Filters and offset pagination for itinerary listings.
///
/// Every filter is optional; present filters are combined with AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryQuery {
    /// Exact region match.
    pub region: Option<String>,
    /// Inclusive lower bound on `duration_nights`.
    pub min_nights: Option<i64>,
    /// Inclusive upper bound on `duration_nights`.
    pub max_nights: Option<i64>,
    /// Match the recommended flag.
    pub recommended: Option<bool>,
    /// Number of rows to skip.
    pub skip: usize,
    /// Maximum number of rows to return.
    pub limit: usize,
}

impl Default for ItineraryQuery {
    fn default() -> Self {
        Self {
            region: None,
            min_nights: None,
            max_nights: None,
            recommended: None,
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

// =============================================================================
// Reference Data
// =============================================================================

/// A place itineraries visit, e.g. "Patong" in the "Phuket" region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[schema(example = 2)]
    pub id: Id,
    #[schema(example = "Patong")]
    pub name: String,
    #[schema(example = "Phuket")]
    pub region: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Hotel {
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "Patong Beach Resort")]
    pub name: String,
    pub location_id: Id,
    pub description: Option<String>,
    #[schema(example = 4.2)]
    pub rating: Option<f64>,
    #[schema(example = 120.0)]
    pub price_per_night: Option<f64>,
}

/// Mode of a transfer between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    Taxi,
    Bus,
    Ferry,
    PrivateCar,
    Airplane,
}

impl TransferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::Taxi => "taxi",
            TransferType::Bus => "bus",
            TransferType::Ferry => "ferry",
            TransferType::PrivateCar => "private_car",
            TransferType::Airplane => "airplane",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "taxi" => Ok(TransferType::Taxi),
            "bus" => Ok(TransferType::Bus),
            "ferry" => Ok(TransferType::Ferry),
            "private_car" => Ok(TransferType::PrivateCar),
            "airplane" => Ok(TransferType::Airplane),
            _ => Err(format!("Invalid transfer type: {}", s)),
        }
    }
}

/// A timed, priced movement between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transfer {
    #[schema(example = 1)]
    pub id: Id,
    pub origin_location_id: Id,
    pub destination_location_id: Id,
    pub transfer_type: TransferType,
    #[schema(example = 45)]
    pub duration_minutes: Option<i64>,
    #[schema(example = 20.0)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Activity {
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "Patong Beach Day")]
    pub name: String,
    pub location_id: Id,
    pub description: Option<String>,
    #[schema(example = 360)]
    pub duration_minutes: Option<i64>,
    #[schema(example = 0.0)]
    pub price: Option<f64>,
}

// =============================================================================
// Itineraries
// =============================================================================

/// Itinerary row without its days, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItinerarySummary {
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "Phuket Quick Escape")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "Phuket")]
    pub region: String,
    #[schema(example = 3)]
    pub duration_nights: i64,
    pub is_recommended: bool,
}

/// The hotel assignment for exactly one itinerary day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HotelStay {
    pub id: Id,
    pub itinerary_day_id: Id,
    pub hotel_id: Id,
    pub hotel: Hotel,
}

/// One day of an itinerary with its transfer, hotel stay and activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItineraryDay {
    pub id: Id,
    #[schema(example = 1)]
    pub day_number: i64,
    pub transfer_id: Option<Id>,
    pub transfer: Option<Transfer>,
    pub hotel_stay: Option<HotelStay>,
    pub activities: Vec<Activity>,
}

/// Itinerary with its days ordered by `day_number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItineraryDetail {
    #[serde(flatten)]
    pub summary: ItinerarySummary,
    pub days: Vec<ItineraryDay>,
}

// =============================================================================
// Creation Payloads
// =============================================================================

/// One day in a creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewItineraryDay {
    #[schema(example = 1)]
    pub day_number: i64,
    #[serde(default)]
    pub transfer_id: Option<Id>,
    #[schema(example = 1)]
    pub hotel_id: Id,
    /// Activities to link; ids that do not resolve are ignored.
    #[serde(default)]
    #[schema(example = json!([1, 2]))]
    pub activity_ids: Vec<Id>,
}

/// Payload for creating an itinerary with its days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewItinerary {
    #[schema(example = "Phuket Weekend")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(example = "Phuket")]
    pub region: String,
    #[schema(example = 2)]
    pub duration_nights: i64,
    /// Accepts `true`/`false` or the legacy `1`/`0`.
    #[serde(default, deserialize_with = "crate::serde_utils::bool_or_int")]
    pub is_recommended: bool,
    pub days: Vec<NewItineraryDay>,
}

impl NewItinerary {
    /// Check the payload shape before anything is written.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.region.trim().is_empty() {
            return Err("region must not be empty".to_string());
        }
        if self.duration_nights < 0 {
            return Err(format!(
                "duration_nights must not be negative (got {})",
                self.duration_nights
            ));
        }
        if let Some(day) = self.days.iter().find(|d| d.day_number < 1) {
            return Err(format!(
                "day_number must be 1 or greater (got {})",
                day.day_number
            ));
        }
        Ok(())
    }
}

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedItinerary {
    #[serde(flatten)]
    pub itinerary: ItineraryDetail,
    /// Activity ids from the payload that matched no activity.
    pub ignored_activity_ids: Vec<Id>,
}
