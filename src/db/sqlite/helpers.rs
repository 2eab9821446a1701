//! Shared helper functions for SQLite repositories.

use std::str::FromStr;

use sqlx::Row;
use sqlx::error::ErrorKind;
use sqlx::sqlite::SqliteRow;

use crate::db::{Activity, DbError, DbResult, Hotel, ItinerarySummary, Transfer, TransferType};

/// Map a sqlx error onto the storage-agnostic error type.
///
/// Constraint violations (foreign key, unique, check, not null) get their own
/// variant so callers can tell them apart from I/O or connection problems.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match &e {
        sqlx::Error::Database(db_err)
            if matches!(
                db_err.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::UniqueViolation
                    | ErrorKind::CheckViolation
                    | ErrorKind::NotNullViolation
            ) =>
        {
            DbError::Constraint {
                message: db_err.message().to_string(),
            }
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DbError::Connection {
                message: e.to_string(),
            }
        }
        _ => DbError::Database {
            message: e.to_string(),
        },
    }
}

/// Clamp a pagination value into SQLite's signed integer range.
pub fn to_sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub fn summary_from_row(row: &SqliteRow) -> ItinerarySummary {
    let flag: i64 = row.get("is_recommended");
    ItinerarySummary {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        region: row.get("region"),
        duration_nights: row.get("duration_nights"),
        is_recommended: flag != 0,
    }
}

/// Decode a hotel from columns prefixed with `hotel_`.
pub fn hotel_from_row(row: &SqliteRow) -> Hotel {
    Hotel {
        id: row.get("hotel_id"),
        name: row.get("hotel_name"),
        location_id: row.get("hotel_location_id"),
        description: row.get("hotel_description"),
        rating: row.get("hotel_rating"),
        price_per_night: row.get("hotel_price_per_night"),
    }
}

pub fn transfer_from_row(row: &SqliteRow) -> DbResult<Transfer> {
    let raw_type: String = row.get("transfer_type");
    let transfer_type = TransferType::from_str(&raw_type).map_err(|message| DbError::InvalidData {
        message,
        help: "Stored transfer types must be taxi, bus, ferry, private_car or airplane"
            .to_string(),
    })?;

    Ok(Transfer {
        id: row.get("id"),
        origin_location_id: row.get("origin_location_id"),
        destination_location_id: row.get("destination_location_id"),
        transfer_type,
        duration_minutes: row.get("duration_minutes"),
        price: row.get("price"),
    })
}

pub fn activity_from_row(row: &SqliteRow) -> Activity {
    Activity {
        id: row.get("id"),
        name: row.get("name"),
        location_id: row.get("location_id"),
        description: row.get("description"),
        duration_minutes: row.get("duration_minutes"),
        price: row.get("price"),
    }
}
