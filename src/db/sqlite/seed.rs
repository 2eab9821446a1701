//! First-boot seeding of the demonstration catalog.
//!
//! The catalog lives in `data/seed.yaml` and is compiled into the binary.
//! Records reference each other by symbolic key; keys are resolved to the
//! generated row ids as the records are inserted.

use std::collections::HashMap;

use serde::Deserialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{info, instrument};

use super::helpers::map_sqlx_error;
use super::itinerary::insert_itinerary;
use crate::db::{DbError, DbResult, Id, NewItinerary, NewItineraryDay, SeedSummary, TransferType};

const SEED_YAML: &str = include_str!("../../../data/seed.yaml");

#[derive(Debug, Deserialize)]
struct SeedCatalog {
    locations: Vec<SeedLocation>,
    hotels: Vec<SeedHotel>,
    transfers: Vec<SeedTransfer>,
    activities: Vec<SeedActivity>,
    itineraries: Vec<SeedItinerary>,
}

#[derive(Debug, Deserialize)]
struct SeedLocation {
    key: String,
    name: String,
    region: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedHotel {
    key: String,
    name: String,
    location: String,
    description: Option<String>,
    rating: Option<f64>,
    price_per_night: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SeedTransfer {
    key: String,
    origin: String,
    destination: String,
    transfer_type: TransferType,
    duration_minutes: Option<i64>,
    price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SeedActivity {
    key: String,
    name: String,
    location: String,
    description: Option<String>,
    duration_minutes: Option<i64>,
    price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SeedItinerary {
    name: String,
    description: Option<String>,
    region: String,
    duration_nights: i64,
    #[serde(default)]
    is_recommended: bool,
    days: Vec<SeedDay>,
}

#[derive(Debug, Deserialize)]
struct SeedDay {
    day_number: i64,
    transfer: Option<String>,
    hotel: String,
    #[serde(default)]
    activities: Vec<String>,
}

/// Symbolic key to generated id, per record kind.
struct KeyMap {
    kind: &'static str,
    ids: HashMap<String, Id>,
}

impl KeyMap {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            ids: HashMap::new(),
        }
    }

    fn insert(&mut self, key: &str, id: Id) -> DbResult<()> {
        if self.ids.insert(key.to_string(), id).is_some() {
            return Err(DbError::InvalidData {
                message: format!("duplicate {} key '{}' in seed catalog", self.kind, key),
                help: "Every seed record needs a unique key".to_string(),
            });
        }
        Ok(())
    }

    fn resolve(&self, key: &str) -> DbResult<Id> {
        self.ids
            .get(key)
            .copied()
            .ok_or_else(|| DbError::InvalidData {
                message: format!("unknown {} key '{}' in seed catalog", self.kind, key),
                help: format!("Declare the {} before referencing it", self.kind),
            })
    }
}

fn parse_catalog() -> DbResult<SeedCatalog> {
    serde_yaml::from_str(SEED_YAML).map_err(|e| DbError::InvalidData {
        message: format!("seed catalog is not valid: {e}"),
        help: "Check data/seed.yaml".to_string(),
    })
}

/// Load the catalog when the location table is empty.
///
/// Everything is written in a single transaction, so a failure leaves the
/// database exactly as it was.
#[instrument(skip(pool))]
pub(crate) async fn ensure_seeded(pool: &SqlitePool) -> DbResult<Option<SeedSummary>> {
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM location")
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;
    if existing > 0 {
        info!(locations = existing, "database already seeded");
        return Ok(None);
    }

    let catalog = parse_catalog()?;
    let summary = load_catalog(&mut *tx, &catalog).await?;

    tx.commit().await.map_err(map_sqlx_error)?;

    info!(
        locations = summary.locations,
        hotels = summary.hotels,
        transfers = summary.transfers,
        activities = summary.activities,
        itineraries = summary.itineraries,
        "seeded demonstration catalog"
    );
    Ok(Some(summary))
}

async fn load_catalog(conn: &mut SqliteConnection, catalog: &SeedCatalog) -> DbResult<SeedSummary> {
    let mut locations = KeyMap::new("location");
    for location in &catalog.locations {
        let id = sqlx::query("INSERT INTO location (name, region, description) VALUES (?, ?, ?)")
            .bind(&location.name)
            .bind(&location.region)
            .bind(&location.description)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?
            .last_insert_rowid();
        locations.insert(&location.key, id)?;
    }

    let mut hotels = KeyMap::new("hotel");
    for hotel in &catalog.hotels {
        let id = sqlx::query(
            "INSERT INTO hotel (name, location_id, description, rating, price_per_night)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&hotel.name)
        .bind(locations.resolve(&hotel.location)?)
        .bind(&hotel.description)
        .bind(hotel.rating)
        .bind(hotel.price_per_night)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();
        hotels.insert(&hotel.key, id)?;
    }

    let mut transfers = KeyMap::new("transfer");
    for transfer in &catalog.transfers {
        let id = sqlx::query(
            "INSERT INTO transfer (origin_location_id, destination_location_id, transfer_type,
                                   duration_minutes, price)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(locations.resolve(&transfer.origin)?)
        .bind(locations.resolve(&transfer.destination)?)
        .bind(transfer.transfer_type.as_str())
        .bind(transfer.duration_minutes)
        .bind(transfer.price)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();
        transfers.insert(&transfer.key, id)?;
    }

    let mut activities = KeyMap::new("activity");
    for activity in &catalog.activities {
        let id = sqlx::query(
            "INSERT INTO activity (name, location_id, description, duration_minutes, price)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&activity.name)
        .bind(locations.resolve(&activity.location)?)
        .bind(&activity.description)
        .bind(activity.duration_minutes)
        .bind(activity.price)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();
        activities.insert(&activity.key, id)?;
    }

    for seed in &catalog.itineraries {
        let days = seed
            .days
            .iter()
            .map(|day| -> DbResult<NewItineraryDay> {
                Ok(NewItineraryDay {
                    day_number: day.day_number,
                    transfer_id: day
                        .transfer
                        .as_deref()
                        .map(|key| transfers.resolve(key))
                        .transpose()?,
                    hotel_id: hotels.resolve(&day.hotel)?,
                    activity_ids: day
                        .activities
                        .iter()
                        .map(|key| activities.resolve(key))
                        .collect::<DbResult<Vec<_>>>()?,
                })
            })
            .collect::<DbResult<Vec<_>>>()?;

        let itinerary = NewItinerary {
            name: seed.name.clone(),
            description: seed.description.clone(),
            region: seed.region.clone(),
            duration_nights: seed.duration_nights,
            is_recommended: seed.is_recommended,
            days,
        };
        itinerary
            .validate()
            .map_err(|message| DbError::Validation { message })?;

        insert_itinerary(&mut *conn, &itinerary).await?;
    }

    Ok(SeedSummary {
        locations: catalog.locations.len(),
        hotels: catalog.hotels.len(),
        transfers: catalog.transfers.len(),
        activities: catalog.activities.len(),
        itineraries: catalog.itineraries.len(),
    })
}
