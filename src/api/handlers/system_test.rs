//! Tests for system endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

async fn test_app(enable_docs: bool) -> axum::Router {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    routes::create_router(AppState::new(db), enable_docs)
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn root_lists_endpoints() {
    let app = test_app(false).await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Welcome to the Travel Itinerary API");
    assert!(body.get("docs").is_none(), "No docs link when /docs is not served");
    assert_eq!(body["endpoints"]["itineraries"], "/itineraries");
}

#[tokio::test(flavor = "multi_thread")]
async fn root_links_docs_when_enabled() {
    let app = test_app(true).await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["docs"], "/docs");
    assert_eq!(body["endpoints"]["mcp"], "/mcp");
}

#[tokio::test(flavor = "multi_thread")]
async fn health_returns_ok() {
    let app = test_app(false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn docs_only_served_when_enabled() {
    let disabled = test_app(false)
        .await
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(disabled.status(), StatusCode::NOT_FOUND);

    let enabled = test_app(true)
        .await
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(enabled.status(), StatusCode::OK);
}
