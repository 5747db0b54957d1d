//! Integration tests for version creation, history, and comparison.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, version_id};

#[tokio::test]
async fn test_first_version_is_a_create() {
    let app = TestApp::new();
    app.register_document("handbook").await;

    let version = app.commit("handbook", "Welcome to the team.\n").await;

    assert_eq!(version["version_number"], 1);
    assert_eq!(version["operation"], "create");
    assert_eq!(version["is_current"], true);
    assert!(version["parent_version_id"].is_null());
    assert_eq!(version["content_hash"].as_str().map(str::len), Some(64));
}

#[tokio::test]
async fn test_update_defaults_parent_to_current() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    let v1 = app.commit("handbook", "line one\nline two\n").await;

    let v2 = app.commit("handbook", "line one\nline 2\nline three\n").await;

    assert_eq!(v2["version_number"], 2);
    assert_eq!(v2["operation"], "update");
    assert_eq!(v2["parent_version_id"], v1["version_id"]);
    assert_eq!(v2["lines_added"], 1);
    assert_eq!(v2["lines_modified"], 1);
}

#[tokio::test]
async fn test_version_for_unregistered_document_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/documents/ghost/versions",
            Some(json!({ "content": "Some text", "author": "alice" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_author_is_rejected() {
    let app = TestApp::new();
    app.register_document("handbook").await;

    let response = app
        .request(
            "POST",
            "/api/documents/handbook/versions",
            Some(json!({ "content": "Some text", "author": "   " })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_history_is_newest_first_without_content() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    for text in ["first draft", "second draft", "third draft"] {
        app.commit("handbook", text).await;
    }

    let response = app
        .request("GET", "/api/documents/handbook/versions?limit=2", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let history = response.data().as_array().expect("array");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["version_number"], 3);
    assert_eq!(history[1]["version_number"], 2);
    assert!(history[0].get("content").is_none());
    assert_eq!(history[0]["size_bytes"], "third draft".len());
}

#[tokio::test]
async fn test_history_limit_out_of_range() {
    let app = TestApp::new();
    app.register_document("handbook").await;

    let response = app
        .request("GET", "/api/documents/handbook/versions?limit=0", None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_current_version_and_content() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    app.commit("handbook", "first draft").await;
    let v2 = app.commit("handbook", "second draft").await;

    let current = app
        .request("GET", "/api/documents/handbook/versions/current", None)
        .await;
    assert_eq!(current.status, StatusCode::OK);
    assert_eq!(current.data()["version_id"], v2["version_id"]);

    let content = app
        .request(
            "GET",
            &format!("/api/versions/{}/content", version_id(&v2)),
            None,
        )
        .await;
    assert_eq!(content.status, StatusCode::OK);
    assert_eq!(content.data()["content"], "second draft");
}

#[tokio::test]
async fn test_document_without_versions_has_no_current() {
    let app = TestApp::new();
    app.register_document("handbook").await;

    let response = app
        .request("GET", "/api/documents/handbook/versions/current", None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_version_id_is_bad_request() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/versions/not-a-uuid", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_version_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/versions/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_compare_versions() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    let v1 = app.commit("handbook", "alpha\nbeta\ngamma\n").await;
    let v2 = app.commit("handbook", "alpha\nBETA\ngamma\ndelta\n").await;

    let response = app
        .request(
            "GET",
            &format!("/api/versions/{}/compare/{}", version_id(&v1), version_id(&v2)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let diff = response.data();
    assert_eq!(diff["lines_added"], 1);
    assert_eq!(diff["lines_modified"], 1);
    assert!(diff["similarity_score"].as_f64().expect("score") < 1.0);
    assert!(
        diff["unified_diff"]
            .as_str()
            .expect("unified diff")
            .contains("+BETA")
    );
}

#[tokio::test]
async fn test_compare_with_itself_is_identical() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    let v1 = app.commit("handbook", "alpha\nbeta\n").await;
    let id = version_id(&v1);

    let response = app
        .request("GET", &format!("/api/versions/{id}/compare/{id}"), None)
        .await;

    assert_eq!(response.data()["similarity_score"], 1.0);
    assert_eq!(response.data()["total_changes"], 0);
}

#[tokio::test]
async fn test_cleanup_keeps_newest_versions() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    for n in 1..=5 {
        app.commit("handbook", &format!("revision {n}")).await;
    }

    let response = app
        .request(
            "POST",
            "/api/versions/cleanup",
            Some(json!({ "doc_id": "handbook", "keep_versions": 2 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["documents_processed"], 1);
    assert_eq!(response.data()["versions_deleted"], 3);

    let active = app
        .request("GET", "/api/documents/handbook/versions", None)
        .await;
    assert_eq!(active.data().as_array().map(Vec::len), Some(2));

    let all = app
        .request(
            "GET",
            "/api/documents/handbook/versions?include_deleted=true",
            None,
        )
        .await;
    assert_eq!(all.data().as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_cleanup_uses_configured_default() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    let total = app.config.versioning.default_keep_versions + 2;
    for n in 1..=total {
        app.commit("handbook", &format!("revision {n}")).await;
    }

    let response = app
        .request("POST", "/api/versions/cleanup", Some(json!({})))
        .await;

    assert_eq!(response.data()["versions_deleted"], 2);
}

#[tokio::test]
async fn test_cleanup_rejects_zero_keep() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/versions/cleanup",
            Some(json!({ "keep_versions": 0 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
