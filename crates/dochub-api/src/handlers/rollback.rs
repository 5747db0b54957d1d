//! Rollback safety and execution handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use dochub_entity::rollback::{RollbackOutcome, RollbackSafetyCheck};

use crate::dto::request::RollbackRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_version_id};
use crate::state::AppState;

/// GET /api/documents/{doc_id}/rollback/{version_id}/safety
pub async fn rollback_safety(
    State(state): State<AppState>,
    Path((doc_id, version_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<RollbackSafetyCheck>>, ApiError> {
    let target = parse_version_id(&version_id)?;
    let check = state.rollback.validate_rollback_safety(&doc_id, target).await;
    Ok(Json(ApiResponse::ok(check)))
}

/// POST /api/documents/{doc_id}/rollback
pub async fn rollback(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
    ValidatedJson(req): ValidatedJson<RollbackRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RollbackOutcome>>), ApiError> {
    let outcome = state
        .rollback
        .rollback_to_version(&doc_id, req.target_version_id, &req.author, req.force)
        .await;

    let status = if outcome.success {
        StatusCode::CREATED
    } else {
        StatusCode::CONFLICT
    };
    Ok((status, Json(ApiResponse::outcome(outcome.success, outcome))))
}
