//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Pings the database on the postgres backend and answers 503 when the
/// ping fails.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let reachable = match &state.database {
        Some(database) => Some(database.is_reachable().await),
        None => None,
    };
    let (status, code, database) = match reachable {
        None => ("ok", StatusCode::OK, "in_process"),
        Some(true) => ("ok", StatusCode::OK, "connected"),
        Some(false) => ("degraded", StatusCode::SERVICE_UNAVAILABLE, "unreachable"),
    };

    let body = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.to_string(),
        database: database.to_string(),
    };
    (code, Json(ApiResponse::outcome(code.is_success(), body)))
}
