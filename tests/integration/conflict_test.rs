//! Integration tests for conflict detection and resolution.

use http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, version_id};

const BASE: &str = "intro\nbody\nclosing\n";

/// Registers `handbook`, commits `BASE` and then `current` on top of it.
/// Returns the base version.
async fn diverged(app: &TestApp, current: &str) -> Value {
    app.register_document("handbook").await;
    let base = app.commit("handbook", BASE).await;
    app.commit("handbook", current).await;
    base
}

async fn detect(app: &TestApp, base: &Value, content: &str) -> Value {
    let response = app
        .request(
            "POST",
            "/api/documents/handbook/conflicts",
            Some(json!({ "base_version_id": base["version_id"], "content": content })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    response.data().clone()
}

async fn resolve(app: &TestApp, conflict_id: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .request(
            "POST",
            &format!("/api/conflicts/{conflict_id}/resolve"),
            Some(body),
        )
        .await;
    (response.status, response.body)
}

#[tokio::test]
async fn test_overlapping_edit_is_a_conflict() {
    let app = TestApp::new();
    let base = diverged(&app, "intro\nbody by alice\nclosing\n").await;

    let check = detect(&app, &base, "intro\nbody by bob\nclosing\n").await;

    assert_eq!(check["has_conflict"], true);
    let conflict = &check["conflict"];
    assert_eq!(conflict["conflict_type"], "concurrent_edit");
    assert_eq!(conflict["base_version_id"], base["version_id"]);
    let areas = conflict["conflict_areas"].as_array().expect("areas");
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0]["start_line"], 2);
    assert_eq!(areas[0]["end_line"], 2);
}

#[tokio::test]
async fn test_disjoint_edit_is_not_a_conflict() {
    let app = TestApp::new();
    let base = diverged(&app, "intro\nbody by alice\nclosing\n").await;

    let check = detect(&app, &base, "intro\nbody\nclosing by bob\n").await;

    assert_eq!(check["has_conflict"], false);
    assert!(check["conflict"].is_null());
}

#[tokio::test]
async fn test_edit_on_current_version_is_not_a_conflict() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    let current = app.commit("handbook", BASE).await;

    let check = detect(&app, &current, "intro\nnew body\nclosing\n").await;

    assert_eq!(check["has_conflict"], false);
}

#[tokio::test]
async fn test_unknown_base_version_is_not_found() {
    let app = TestApp::new();
    app.register_document("handbook").await;
    app.commit("handbook", BASE).await;

    let response = app
        .request(
            "POST",
            "/api/documents/handbook/conflicts",
            Some(json!({
                "base_version_id": "00000000-0000-0000-0000-000000000000",
                "content": "anything",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detected_conflict_can_be_fetched() {
    let app = TestApp::new();
    let base = diverged(&app, "intro\nbody by alice\nclosing\n").await;
    let check = detect(&app, &base, "intro\nbody by bob\nclosing\n").await;
    let id = check["conflict"]["conflict_id"].as_str().expect("id");

    let response = app.request("GET", &format!("/api/conflicts/{id}"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["incoming_content"], "intro\nbody by bob\nclosing\n");
}

#[tokio::test]
async fn test_auto_merge_keeps_current_on_overlap() {
    let app = TestApp::new();
    let base = diverged(&app, "intro\nbody by alice\nclosing\n").await;
    let check = detect(&app, &base, "intro\nbody by bob\nclosing\n").await;
    let id = check["conflict"]["conflict_id"].as_str().expect("id").to_string();

    let (status, body) = resolve(
        &app,
        &id,
        json!({ "strategy": "auto_merge", "author": "carol" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    let version = &body["data"]["version"];
    assert_eq!(version["operation"], "merge");
    assert_eq!(version["content"], "intro\nbody by alice\nclosing\n");
    assert_eq!(version["version_number"], 3);
    assert_eq!(body["data"]["messages"].as_array().map(Vec::len), Some(1));

    let gone = app.request("GET", &format!("/api/conflicts/{id}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_force_overwrite_writes_supplied_content() {
    let app = TestApp::new();
    let base = diverged(&app, "intro\nbody by alice\nclosing\n").await;
    let incoming = "intro\nbody by bob\nclosing\n";
    let check = detect(&app, &base, incoming).await;
    let id = check["conflict"]["conflict_id"].as_str().expect("id").to_string();

    let (status, body) = resolve(
        &app,
        &id,
        json!({ "strategy": "force_overwrite", "author": "bob", "merged_content": incoming }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["version"]["content"], incoming);
    assert_eq!(body["data"]["version"]["operation"], "update");
}

#[tokio::test]
async fn test_force_overwrite_without_content_keeps_current_text() {
    let app = TestApp::new();
    let current = "intro\nbody by alice\nclosing\n";
    let base = diverged(&app, current).await;
    let check = detect(&app, &base, "intro\nbody by bob\nclosing\n").await;
    let id = check["conflict"]["conflict_id"].as_str().expect("id").to_string();

    let (status, body) = resolve(
        &app,
        &id,
        json!({ "strategy": "force_overwrite", "author": "bob" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["version"]["content"], current);
    assert_eq!(body["data"]["version"]["version_number"], 3);
}

#[tokio::test]
async fn test_manual_uses_supplied_content() {
    let app = TestApp::new();
    let base = diverged(&app, "intro\nbody by alice\nclosing\n").await;
    let check = detect(&app, &base, "intro\nbody by bob\nclosing\n").await;
    let id = check["conflict"]["conflict_id"].as_str().expect("id").to_string();
    let merged = "intro\nbody by alice and bob\nclosing\n";

    let (status, body) = resolve(
        &app,
        &id,
        json!({ "strategy": "manual", "author": "carol", "merged_content": merged }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["version"]["content"], merged);

    let current = app
        .request("GET", "/api/documents/handbook/versions/current", None)
        .await;
    assert_eq!(current.data()["content"], merged);
}

#[tokio::test]
async fn test_manual_without_content_is_refused() {
    let app = TestApp::new();
    let base = diverged(&app, "intro\nbody by alice\nclosing\n").await;
    let check = detect(&app, &base, "intro\nbody by bob\nclosing\n").await;
    let id = check["conflict"]["conflict_id"].as_str().expect("id").to_string();

    let (status, body) = resolve(
        &app,
        &id,
        json!({ "strategy": "manual", "author": "carol" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert!(body["data"]["version"].is_null());
}

#[tokio::test]
async fn test_abort_leaves_document_untouched() {
    let app = TestApp::new();
    let base = diverged(&app, "intro\nbody by alice\nclosing\n").await;
    let check = detect(&app, &base, "intro\nbody by bob\nclosing\n").await;
    let id = check["conflict"]["conflict_id"].as_str().expect("id").to_string();

    let (status, body) = resolve(
        &app,
        &id,
        json!({ "strategy": "abort", "author": "carol" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["data"]["messages"][0], "Conflict resolution aborted");

    let current = app
        .request("GET", "/api/documents/handbook/versions/current", None)
        .await;
    assert_eq!(current.data()["version_number"], 2);
}

#[tokio::test]
async fn test_resolving_unknown_conflict_is_not_found() {
    let app = TestApp::new();

    let (status, body) = resolve(
        &app,
        "00000000-0000-0000-0000-000000000000",
        json!({ "strategy": "abort", "author": "carol" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_superseded_base_is_not_current() {
    let app = TestApp::new();
    let base = diverged(&app, "intro\nbody by alice\nclosing\n").await;

    let response = app
        .request("GET", &format!("/api/versions/{}", version_id(&base)), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["is_current"], false);
}
