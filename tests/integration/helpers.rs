//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use dochub_api::{AppState, Backends, build_app};
use dochub_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

/// Parsed HTTP response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application on the in-memory backend
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let backends = Backends::memory(&config);
        let state = AppState::new(config.clone(), backends).expect("Failed to build state");
        Self {
            router: build_app(state),
            config,
        }
    }

    /// Send a request with an optional JSON body
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Register a markdown document
    pub async fn register_document(&self, doc_id: &str) {
        let response = self
            .request(
                "POST",
                "/api/documents",
                Some(json!({ "doc_id": doc_id, "title": "Handbook", "doc_type": "markdown" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    }

    /// Create a version on top of the current one and return it
    pub async fn commit(&self, doc_id: &str, content: &str) -> Value {
        let response = self
            .request(
                "POST",
                &format!("/api/documents/{doc_id}/versions"),
                Some(json!({
                    "content": content,
                    "author": "alice",
                    "change_summary": "edit",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data().clone()
    }
}

/// The `version_id` of a version body as a string
pub fn version_id(version: &Value) -> String {
    version["version_id"]
        .as_str()
        .expect("version_id")
        .to_string()
}
