//! Conflict detection and resolution handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use dochub_core::error::AppError;
use dochub_entity::conflict::{ConflictResolution, VersionConflict};

use crate::dto::request::{DetectConflictRequest, ResolveConflictRequest};
use crate::dto::response::{ApiResponse, ConflictCheckResponse};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_conflict_id};
use crate::state::AppState;

/// POST /api/documents/{doc_id}/conflicts
pub async fn detect_conflicts(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
    ValidatedJson(req): ValidatedJson<DetectConflictRequest>,
) -> Result<Json<ApiResponse<ConflictCheckResponse>>, ApiError> {
    let conflict = state
        .conflicts
        .detect_conflicts(&doc_id, &req.content, req.base_version_id)
        .await?;

    Ok(Json(ApiResponse::ok(ConflictCheckResponse {
        has_conflict: conflict.is_some(),
        conflict,
    })))
}

/// GET /api/conflicts/{conflict_id}
pub async fn get_conflict(
    State(state): State<AppState>,
    Path(conflict_id): Path<String>,
) -> Result<Json<ApiResponse<VersionConflict>>, ApiError> {
    let id = parse_conflict_id(&conflict_id)?;
    let conflict = state
        .conflicts
        .get_conflict(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Conflict {id} not found")))?;
    Ok(Json(ApiResponse::ok(conflict)))
}

/// POST /api/conflicts/{conflict_id}/resolve
///
/// A refused resolution answers 409 with the resolution messages in the body.
pub async fn resolve_conflict(
    State(state): State<AppState>,
    Path(conflict_id): Path<String>,
    ValidatedJson(req): ValidatedJson<ResolveConflictRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ConflictResolution>>), ApiError> {
    let id = parse_conflict_id(&conflict_id)?;
    let conflict = state
        .conflicts
        .get_conflict(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Conflict {id} not found")))?;

    let resolution = state
        .conflicts
        .resolve_conflict(
            &conflict,
            req.strategy,
            &req.author,
            req.merged_content.as_deref(),
        )
        .await;

    let status = if resolution.success {
        info!(conflict_id = %id, strategy = %req.strategy, "Conflict resolved");
        StatusCode::CREATED
    } else {
        StatusCode::CONFLICT
    };
    Ok((
        status,
        Json(ApiResponse::outcome(resolution.success, resolution)),
    ))
}
