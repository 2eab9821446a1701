//! SQLite ItineraryRepository implementation.

use std::collections::HashMap;

use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, instrument, warn};

use super::helpers::{
    activity_from_row, hotel_from_row, map_sqlx_error, summary_from_row, to_sql_int,
    transfer_from_row,
};
use crate::db::{
    Activity, CreatedItinerary, DbError, DbResult, HotelStay, Id, ItineraryDay, ItineraryDetail,
    ItineraryQuery, ItineraryRepository, ItinerarySummary, NewItinerary, Transfer,
};

/// SQLx-backed itinerary repository.
pub struct SqliteItineraryRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ItineraryRepository for SqliteItineraryRepository<'a> {
    #[instrument(skip(self))]
    async fn list(&self, query: &ItineraryQuery) -> DbResult<Vec<ItinerarySummary>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, description, region, duration_nights, is_recommended FROM itinerary",
        );

        let mut separator = " WHERE ";
        // An empty region string means "no region filter"
        if let Some(region) = query.region.as_ref().filter(|r| !r.is_empty()) {
            builder.push(separator).push("region = ").push_bind(region.clone());
            separator = " AND ";
        }
        if let Some(min) = query.min_nights {
            builder.push(separator).push("duration_nights >= ").push_bind(min);
            separator = " AND ";
        }
        if let Some(max) = query.max_nights {
            builder.push(separator).push("duration_nights <= ").push_bind(max);
            separator = " AND ";
        }
        if let Some(recommended) = query.recommended {
            builder
                .push(separator)
                .push("is_recommended = ")
                .push_bind(i64::from(recommended));
        }

        builder
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(to_sql_int(query.limit))
            .push(" OFFSET ")
            .push_bind(to_sql_int(query.skip));

        let rows = builder
            .build()
            .fetch_all(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(summary_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Id) -> DbResult<ItineraryDetail> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        load_detail(&mut *conn, id).await
    }

    #[instrument(skip(self, itinerary), fields(name = %itinerary.name, days = itinerary.days.len()))]
    async fn create(&self, itinerary: &NewItinerary) -> DbResult<CreatedItinerary> {
        itinerary
            .validate()
            .map_err(|message| DbError::Validation { message })?;

        // Start a transaction; dropping it without commit rolls everything back
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let (id, ignored_activity_ids) = insert_itinerary(&mut *tx, itinerary).await?;

        tx.commit().await.map_err(map_sqlx_error)?;

        if !ignored_activity_ids.is_empty() {
            warn!(itinerary_id = id, ignored = ?ignored_activity_ids, "skipped unknown activity ids");
        }

        let itinerary = self.get(id).await?;
        Ok(CreatedItinerary {
            itinerary,
            ignored_activity_ids,
        })
    }
}

/// Insert an itinerary and its days on an open connection or transaction.
///
/// Returns the new itinerary id and the activity ids that matched nothing.
/// Shared by the repository and the seed loader so both follow the same
/// insert sequence.
pub(crate) async fn insert_itinerary(
    conn: &mut SqliteConnection,
    itinerary: &NewItinerary,
) -> DbResult<(Id, Vec<Id>)> {
    let itinerary_id = sqlx::query(
        "INSERT INTO itinerary (name, description, region, duration_nights, is_recommended)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&itinerary.name)
    .bind(&itinerary.description)
    .bind(&itinerary.region)
    .bind(itinerary.duration_nights)
    .bind(i64::from(itinerary.is_recommended))
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx_error)?
    .last_insert_rowid();

    let mut ignored = Vec::new();

    for day in &itinerary.days {
        let day_id = sqlx::query(
            "INSERT INTO itinerary_day (itinerary_id, day_number, transfer_id) VALUES (?, ?, ?)",
        )
        .bind(itinerary_id)
        .bind(day.day_number)
        .bind(day.transfer_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();

        sqlx::query("INSERT INTO hotel_stay (itinerary_day_id, hotel_id) VALUES (?, ?)")
            .bind(day_id)
            .bind(day.hotel_id)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        for &activity_id in &day.activity_ids {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM activity WHERE id = ?)")
                    .bind(activity_id)
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(map_sqlx_error)?;

            if !exists {
                if !ignored.contains(&activity_id) {
                    ignored.push(activity_id);
                }
                continue;
            }

            // Repeating an activity within one day links it once
            sqlx::query(
                "INSERT OR IGNORE INTO itinerary_activity (itinerary_day_id, activity_id) VALUES (?, ?)",
            )
            .bind(day_id)
            .bind(activity_id)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        }
    }

    debug!(itinerary_id, days = itinerary.days.len(), "inserted itinerary");
    Ok((itinerary_id, ignored))
}

/// Load one itinerary with all nested day data.
///
/// Uses a fixed number of queries regardless of how many days there are.
async fn load_detail(conn: &mut SqliteConnection, id: Id) -> DbResult<ItineraryDetail> {
    let row = sqlx::query(
        "SELECT id, name, description, region, duration_nights, is_recommended
         FROM itinerary WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;

    let row = row.ok_or(DbError::NotFound {
        entity_type: "Itinerary".to_string(),
        id: id.to_string(),
    })?;
    let summary = summary_from_row(&row);

    let day_rows = sqlx::query(
        "SELECT id, day_number, transfer_id FROM itinerary_day
         WHERE itinerary_id = ? ORDER BY day_number ASC, id ASC",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;

    let mut transfers: HashMap<Id, Transfer> = HashMap::new();
    let transfer_rows = sqlx::query(
        "SELECT t.id, t.origin_location_id, t.destination_location_id, t.transfer_type,
                t.duration_minutes, t.price
         FROM transfer t
         WHERE t.id IN (SELECT transfer_id FROM itinerary_day WHERE itinerary_id = ?)",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;
    for row in &transfer_rows {
        let transfer = transfer_from_row(row)?;
        transfers.insert(transfer.id, transfer);
    }

    let mut stays: HashMap<Id, HotelStay> = HashMap::new();
    let stay_rows = sqlx::query(
        "SELECT s.id, s.itinerary_day_id, h.id AS hotel_id, h.name AS hotel_name,
                h.location_id AS hotel_location_id, h.description AS hotel_description,
                h.rating AS hotel_rating, h.price_per_night AS hotel_price_per_night
         FROM hotel_stay s
         JOIN itinerary_day d ON d.id = s.itinerary_day_id
         JOIN hotel h ON h.id = s.hotel_id
         WHERE d.itinerary_id = ?",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;
    for row in &stay_rows {
        let hotel = hotel_from_row(row);
        let day_id: Id = row.get("itinerary_day_id");
        stays.insert(
            day_id,
            HotelStay {
                id: row.get("id"),
                itinerary_day_id: day_id,
                hotel_id: hotel.id,
                hotel,
            },
        );
    }

    let mut activities: HashMap<Id, Vec<Activity>> = HashMap::new();
    let activity_rows = sqlx::query(
        "SELECT ia.itinerary_day_id, a.id, a.name, a.location_id, a.description,
                a.duration_minutes, a.price
         FROM itinerary_activity ia
         JOIN itinerary_day d ON d.id = ia.itinerary_day_id
         JOIN activity a ON a.id = ia.activity_id
         WHERE d.itinerary_id = ?
         ORDER BY a.id ASC",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;
    for row in &activity_rows {
        let day_id: Id = row.get("itinerary_day_id");
        activities
            .entry(day_id)
            .or_default()
            .push(activity_from_row(row));
    }

    let days = day_rows
        .iter()
        .map(|row| {
            let day_id: Id = row.get("id");
            let transfer_id: Option<Id> = row.get("transfer_id");
            ItineraryDay {
                id: day_id,
                day_number: row.get("day_number"),
                transfer_id,
                transfer: transfer_id.and_then(|t| transfers.get(&t).cloned()),
                hotel_stay: stays.remove(&day_id),
                activities: activities.remove(&day_id).unwrap_or_default(),
            }
        })
        .collect();

    Ok(ItineraryDetail { summary, days })
}
