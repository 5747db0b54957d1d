//! Integration tests for rollback safety checks and execution.

use http::StatusCode;
use serde_json::{Value, json};

use dochub_core::config::AppConfig;

use crate::helpers::{TestApp, version_id};

async fn rollback(app: &TestApp, target: &Value, force: bool) -> (StatusCode, Value) {
    let response = app
        .request(
            "POST",
            "/api/documents/handbook/rollback",
            Some(json!({
                "target_version_id": target["version_id"],
                "author": "dana",
                "force": force,
            })),
        )
        .await;
    (response.status, response.body)
}

async fn safety(app: &TestApp, target: &Value) -> Value {
    let response = app
        .request(
            "GET",
            &format!("/api/documents/handbook/rollback/{}/safety", version_id(target)),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    response.data().clone()
}

#[tokio::test]
async fn test_recent_rollback_is_low_risk() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    let v1 = app.commit("handbook", "Hello world.").await;
    app.commit("handbook", "Hello world.\nSecond line.").await;

    let check = safety(&app, &v1).await;

    assert_eq!(check["is_safe"], true);
    assert_eq!(check["risk_level"], "low");
    assert_eq!(check["impact"]["version_distance"], 1);
    assert!(!check["affected_systems"].as_array().expect("systems").is_empty());
}

#[tokio::test]
async fn test_rollback_creates_new_current_version() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    let v1 = app.commit("handbook", "Hello world.").await;
    app.commit("handbook", "Hello world.\nSecond line.").await;
    let v3 = app.commit("handbook", "Rewritten entirely.").await;

    let (status, body) = rollback(&app, &v1, false).await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    let version = &body["data"]["version"];
    assert_eq!(version["version_number"], 4);
    assert_eq!(version["operation"], "rollback");
    assert_eq!(version["content"], "Hello world.");
    assert_eq!(version["parent_version_id"], v3["version_id"]);
    assert_eq!(version["change_summary"], "Rollback to version 1");

    let history = app
        .request("GET", "/api/documents/handbook/versions", None)
        .await;
    assert_eq!(history.data().as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_rollback_to_current_is_refused() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    app.commit("handbook", "Hello world.").await;
    let v2 = app.commit("handbook", "Hello again.").await;

    let check = safety(&app, &v2).await;
    assert_eq!(check["is_safe"], false);

    let (status, body) = rollback(&app, &v2, false).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert!(!body["data"]["errors"].as_array().expect("errors").is_empty());
}

#[tokio::test]
async fn test_unknown_target_fails_closed() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    app.commit("handbook", "Hello world.").await;
    let missing = json!({ "version_id": "00000000-0000-0000-0000-000000000000" });

    let check = safety(&app, &missing).await;
    assert_eq!(check["is_safe"], false);
    assert_eq!(check["risk_level"], "critical");

    let (status, _) = rollback(&app, &missing, false).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_target_from_another_document_is_refused() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    app.register_document("policies").await;
    app.commit("handbook", "Hello world.").await;
    app.commit("handbook", "Hello again.").await;
    let foreign = app.commit("policies", "Policy text.").await;

    let (status, body) = rollback(&app, &foreign, false).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_high_risk_requires_force() {
    let mut config = AppConfig::default();
    config.rollback.medium_risk_distance = 1;
    config.rollback.high_risk_distance = 2;
    config.rollback.block_at_risk = "high".to_string();
    let app = TestApp::with_config(config);
    app.register_document("handbook").await;
    let v1 = app.commit("handbook", "revision one").await;
    for text in ["revision two", "revision three", "revision four"] {
        app.commit("handbook", text).await;
    }

    let check = safety(&app, &v1).await;
    assert_eq!(check["risk_level"], "high");
    assert_eq!(check["is_safe"], false);

    let (status, _) = rollback(&app, &v1, false).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = rollback(&app, &v1, true).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["version"]["content"], "revision one");
    let warnings = body["data"]["warnings"].as_array().expect("warnings");
    assert!(
        warnings
            .iter()
            .any(|w| w == "Safety check skipped for forced rollback")
    );
}

#[tokio::test]
async fn test_rollback_requires_author() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    let v1 = app.commit("handbook", "Hello world.").await;

    let response = app
        .request(
            "POST",
            "/api/documents/handbook/rollback",
            Some(json!({ "target_version_id": v1["version_id"], "author": "" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
