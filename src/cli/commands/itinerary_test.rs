use std::io::Write;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::api::create_app;
use crate::cli::api_client::ApiClient;
use crate::cli::commands::itinerary::*;
use crate::cli::error::CliError;
use crate::db::{Database, SqliteDatabase};

// Initialize crypto provider once for all tests
fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Spawn a seeded API server on an ephemeral port and return its URL
async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
    init_crypto();

    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    db.ensure_seeded().await.expect("Failed to seed database");

    let app = create_app(db, false, CancellationToken::new());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    (url, handle)
}

fn payload_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[tokio::test(flavor = "multi_thread")]
async fn list_itineraries_renders_table() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = list_itineraries(&api_client, ListItinerariesFilter::default(), "table")
        .await
        .unwrap();

    assert!(output.contains("Phuket Quick Escape"));
    assert!(output.contains("Krabi Explorer"));
    assert!(output.contains("Thailand Beach Paradise"));
    assert!(output.contains("Recommended"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_itineraries_json_applies_filters() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let filter = ListItinerariesFilter {
        region: Some("Krabi"),
        max_nights: Some(6),
        ..Default::default()
    };
    let output = list_itineraries(&api_client, filter, "json").await.unwrap();

    let items: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Krabi Explorer");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_itineraries_empty_result() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let filter = ListItinerariesFilter {
        recommended: Some(false),
        ..Default::default()
    };
    let output = list_itineraries(&api_client, filter, "table").await.unwrap();

    assert_eq!(output, "No itineraries found.");
}

#[tokio::test(flavor = "multi_thread")]
async fn show_itinerary_renders_days() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = show_itinerary(&api_client, 1, "table").await.unwrap();

    assert!(output.starts_with("Phuket Quick Escape (#1)"));
    assert!(output.contains("Region: Phuket"));
    assert!(output.contains("Patong Beach Resort"));
    assert!(output.contains("taxi (45m)"));
    assert!(output.contains("Phi Phi Islands Day Trip"));
}

#[tokio::test(flavor = "multi_thread")]
async fn show_itinerary_missing_is_api_error() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let err = show_itinerary(&api_client, 999, "table").await.unwrap_err();

    match err {
        CliError::ApiError { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Itinerary '999' not found");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_itinerary_from_file() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url.clone()));

    let file = payload_file(
        r#"{
            "name": "Railay Retreat",
            "region": "Krabi",
            "duration_nights": 2,
            "days": [
                {"day_number": 1, "transfer_id": 7, "hotel_id": 6, "activity_ids": [7]},
                {"day_number": 2, "hotel_id": 6, "activity_ids": [123]}
            ]
        }"#,
    );

    let output = create_itinerary(&api_client, file.path(), "table")
        .await
        .unwrap();

    assert!(output.starts_with("Created itinerary 4: Railay Retreat (2 days)"));
    assert!(output.contains("Ignored unknown activity ids: 123"));

    // The new itinerary is visible through the API
    let shown = show_itinerary(&ApiClient::new(Some(url)), 4, "json")
        .await
        .unwrap();
    let detail: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(detail["days"][0]["transfer"]["transfer_type"], "ferry");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_itinerary_invalid_file_is_reported_locally() {
    init_crypto();
    let api_client = ApiClient::new(Some("http://127.0.0.1:9".to_string()));
    let file = payload_file(r#"{"name": "Missing everything"}"#);

    let err = create_itinerary(&api_client, file.path(), "table")
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::InvalidPayload { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_itinerary_missing_file() {
    init_crypto();
    let api_client = ApiClient::new(Some("http://127.0.0.1:9".to_string()));

    let err = create_itinerary(
        &api_client,
        std::path::Path::new("/nonexistent/itinerary.json"),
        "table",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CliError::ReadFile { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_itinerary_server_rejection_is_api_error() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    let file = payload_file(
        r#"{"name": "Ghost Hotel", "region": "Krabi", "duration_nights": 1,
            "days": [{"day_number": 1, "hotel_id": 4040}]}"#,
    );

    let err = create_itinerary(&api_client, file.path(), "table")
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::ApiError { status: 500, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_connection_failure() {
    init_crypto();
    // Bind and drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api_client = ApiClient::new(Some(format!("http://{}", addr)));
    let err = list_itineraries(&api_client, ListItinerariesFilter::default(), "table")
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::ConnectionFailed { .. }));
}
