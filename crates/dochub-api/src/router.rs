//! Route definitions for the DocHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, the body limit, and request logging.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(document_routes())
        .merge(version_routes())
        .merge(conflict_routes())
        .merge(rollback_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Document registration and lookup
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", post(handlers::document::register_document))
        .route("/documents/{doc_id}", get(handlers::document::get_document))
}

/// Version creation, history, content, comparison, cleanup
fn version_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/{doc_id}/versions",
            get(handlers::version::list_versions).post(handlers::version::create_version),
        )
        .route(
            "/documents/{doc_id}/versions/current",
            get(handlers::version::get_current_version),
        )
        .route("/versions/cleanup", post(handlers::version::cleanup_versions))
        .route("/versions/{version_id}", get(handlers::version::get_version))
        .route(
            "/versions/{version_id}/content",
            get(handlers::version::get_version_content),
        )
        .route(
            "/versions/{from}/compare/{to}",
            get(handlers::version::compare_versions),
        )
}

/// Conflict detection and resolution
fn conflict_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/{doc_id}/conflicts",
            post(handlers::conflict::detect_conflicts),
        )
        .route("/conflicts/{conflict_id}", get(handlers::conflict::get_conflict))
        .route(
            "/conflicts/{conflict_id}/resolve",
            post(handlers::conflict::resolve_conflict),
        )
}

/// Rollback safety check and execution
fn rollback_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/{doc_id}/rollback",
            post(handlers::rollback::rollback),
        )
        .route(
            "/documents/{doc_id}/rollback/{version_id}/safety",
            get(handlers::rollback::rollback_safety),
        )
}

/// Liveness and database status
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
