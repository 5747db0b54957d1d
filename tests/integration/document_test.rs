//! Integration tests for document registration and service health.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_backend() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["backend"], "memory");
    assert_eq!(response.data()["database"], "in_process");
}

#[tokio::test]
async fn test_register_and_fetch_document() {
    let app = TestApp::new();
    app.register_document("handbook").await;

    let response = app.request("GET", "/api/documents/handbook", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["title"], "Handbook");
    assert_eq!(response.data()["doc_type"], "markdown");
    assert!(response.data()["current_version_id"].is_null());
}

#[tokio::test]
async fn test_unknown_document_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/documents/missing", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_register_requires_title() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "doc_id": "handbook", "title": "" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/documents", Some(json!({ "title": "No id" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_document_tracks_current_version() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    let version = app.commit("handbook", "Welcome to the team.\n").await;

    let response = app.request("GET", "/api/documents/handbook", None).await;

    assert_eq!(response.data()["current_version_id"], version["version_id"]);
    assert_eq!(response.data()["current_version_number"], 1);
    assert_eq!(response.data()["last_modified_by"], "alice");
}
