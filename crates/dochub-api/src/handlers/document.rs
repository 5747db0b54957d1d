//! Document registration handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use dochub_core::error::AppError;
use dochub_entity::document::DocumentMetadata;

use crate::dto::request::RegisterDocumentRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/documents
pub async fn register_document(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterDocumentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DocumentMetadata>>), ApiError> {
    let mut metadata = DocumentMetadata::new(req.doc_id, req.title, req.doc_type);
    metadata.extra = req.extra;

    state.documents.register_document(&metadata).await?;
    info!(doc_id = %metadata.doc_id, "Document registered");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(metadata))))
}

/// GET /api/documents/{doc_id}
pub async fn get_document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<ApiResponse<DocumentMetadata>>, ApiError> {
    let metadata = state
        .documents
        .get_document(&doc_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Document '{doc_id}' not found")))?;
    Ok(Json(ApiResponse::ok(metadata)))
}
