use crate::cli::commands::serve::open_database;
use crate::db::{Database, ItineraryQuery, ItineraryRepository};

#[tokio::test(flavor = "multi_thread")]
async fn open_database_creates_directory_and_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested/dir/itinerary.db");

    let db = open_database(&db_path, true).await.unwrap();

    assert!(db_path.exists());
    let itineraries = db
        .itineraries()
        .list(&ItineraryQuery::default())
        .await
        .unwrap();
    assert_eq!(itineraries.len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn open_database_without_seed_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("itinerary.db");

    let db = open_database(&db_path, false).await.unwrap();

    let itineraries = db
        .itineraries()
        .list(&ItineraryQuery::default())
        .await
        .unwrap();
    assert!(itineraries.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn reopening_does_not_seed_twice() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("itinerary.db");

    let first = open_database(&db_path, true).await.unwrap();
    first.pool().close().await;

    let db = open_database(&db_path, true).await.unwrap();
    assert!(db.ensure_seeded().await.unwrap().is_none());
    let itineraries = db
        .itineraries()
        .list(&ItineraryQuery::default())
        .await
        .unwrap();
    assert_eq!(itineraries.len(), 3);
}
