//! Tests for SQLite database connection and migrations.

use crate::db::{Database, SqliteDatabase};

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_all_tables() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("Migration should succeed");

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Query should succeed");

    // sqlite_sequence exists because of AUTOINCREMENT;
    // _sqlx_migrations is created by sqlx for migration tracking.
    let expected = vec![
        "_sqlx_migrations",
        "activity",
        "hotel",
        "hotel_stay",
        "itinerary",
        "itinerary_activity",
        "itinerary_day",
        "location",
        "transfer",
    ];

    for table in &expected {
        assert!(
            tables.iter().any(|t| t == table),
            "Missing table: {}. Found tables: {:?}",
            table,
            tables
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("First migration should succeed");
    db.migrate()
        .await
        .expect("Second migration should be a no-op");
}

#[tokio::test(flavor = "multi_thread")]
async fn foreign_keys_are_enforced() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");

    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(db.pool())
        .await
        .expect("Query should succeed");
    assert_eq!(enabled, 1);

    let result = sqlx::query("INSERT INTO hotel (name, location_id) VALUES ('Orphan', 999)")
        .execute(db.pool())
        .await;
    assert!(result.is_err(), "Hotel without a location must be rejected");
}

#[tokio::test(flavor = "multi_thread")]
async fn transfer_type_is_checked() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");

    sqlx::query("INSERT INTO location (name, region) VALUES ('A', 'R'), ('B', 'R')")
        .execute(db.pool())
        .await
        .expect("Insert should succeed");

    let result = sqlx::query(
        "INSERT INTO transfer (origin_location_id, destination_location_id, transfer_type)
         VALUES (1, 2, 'rocket')",
    )
    .execute(db.pool())
    .await;
    assert!(result.is_err(), "Unknown transfer type must be rejected");
}

#[tokio::test(flavor = "multi_thread")]
async fn file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("itinerary.db");

    {
        let db = SqliteDatabase::open(&path)
            .await
            .expect("Failed to open file database");
        db.migrate().await.expect("Migration should succeed");
        sqlx::query("INSERT INTO location (name, region) VALUES ('Patong', 'Phuket')")
            .execute(db.pool())
            .await
            .expect("Insert should succeed");
        db.pool().close().await;
    }

    assert!(path.exists(), "Database file should be created");

    let db = SqliteDatabase::open(&path)
        .await
        .expect("Failed to reopen file database");
    db.migrate().await.expect("Migration should succeed");
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM location")
        .fetch_one(db.pool())
        .await
        .expect("Query should succeed");
    assert_eq!(count, 1);
}
