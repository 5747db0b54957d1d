//! Version creation, lookup, comparison, and cleanup handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use dochub_core::error::AppError;
use dochub_entity::diff::VersionDiff;
use dochub_entity::version::{CleanupStats, NewVersion, Version, VersionOperation};

use crate::dto::request::{CleanupRequest, CreateVersionRequest, HistoryQuery};
use crate::dto::response::{ApiResponse, VersionContentResponse, VersionSummary};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_version_id};
use crate::state::AppState;

/// POST /api/documents/{doc_id}/versions
pub async fn create_version(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateVersionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Version>>), ApiError> {
    let current = state.versions.get_current_version(&doc_id).await;

    let operation = req.operation.unwrap_or(match current {
        Some(_) => VersionOperation::Update,
        None => VersionOperation::Create,
    });

    let mut new = NewVersion::new(doc_id, req.content, req.author, operation)
        .with_summary(req.change_summary);
    if let Some(parent) = req
        .parent_version_id
        .or(current.map(|c| c.version_id))
    {
        new = new.with_parent(parent);
    }

    let version = state.versions.create_version(new).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(version))))
}

/// GET /api/documents/{doc_id}/versions?limit=&include_deleted=
pub async fn list_versions(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<VersionSummary>>>, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let history = state
        .versions
        .get_version_history(&doc_id, query.limit, query.include_deleted)
        .await;
    Ok(Json(ApiResponse::ok(
        history.iter().map(VersionSummary::from).collect(),
    )))
}

/// GET /api/documents/{doc_id}/versions/current
pub async fn get_current_version(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<ApiResponse<Version>>, ApiError> {
    let version = state
        .versions
        .get_current_version(&doc_id)
        .await
        .ok_or_else(|| {
            AppError::not_found(format!("Document '{doc_id}' has no current version"))
        })?;
    Ok(Json(ApiResponse::ok(version)))
}

/// GET /api/versions/{version_id}
pub async fn get_version(
    State(state): State<AppState>,
    Path(version_id): Path<String>,
) -> Result<Json<ApiResponse<Version>>, ApiError> {
    let id = parse_version_id(&version_id)?;
    let version = state
        .versions
        .get_version(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Version {id} not found")))?;
    Ok(Json(ApiResponse::ok(version)))
}

/// GET /api/versions/{version_id}/content
pub async fn get_version_content(
    State(state): State<AppState>,
    Path(version_id): Path<String>,
) -> Result<Json<ApiResponse<VersionContentResponse>>, ApiError> {
    let id = parse_version_id(&version_id)?;
    let content = state
        .versions
        .get_version_content(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Version {id} not found")))?;
    Ok(Json(ApiResponse::ok(VersionContentResponse {
        version_id: id,
        content,
    })))
}

/// GET /api/versions/{from}/compare/{to}
pub async fn compare_versions(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<ApiResponse<VersionDiff>>, ApiError> {
    let from = parse_version_id(&from)?;
    let to = parse_version_id(&to)?;
    let diff = state
        .versions
        .compare_versions(from, to)
        .await
        .ok_or_else(|| AppError::not_found("One or both versions not found"))?;
    Ok(Json(ApiResponse::ok(diff)))
}

/// POST /api/versions/cleanup
pub async fn cleanup_versions(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CleanupRequest>,
) -> Result<Json<ApiResponse<CleanupStats>>, ApiError> {
    let keep = req
        .keep_versions
        .unwrap_or(state.config.versioning.default_keep_versions);
    let stats = state
        .versions
        .cleanup_old_versions(req.doc_id.as_deref(), keep)
        .await;
    Ok(Json(ApiResponse::ok(stats)))
}
