//! Version repository backed by the `document_versions` table.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::types::VersionId;
use dochub_entity::version::{Version, VersionStatus};

use super::row::{VersionRow, readable_versions};
use crate::traits::VersionRepository;

/// Repository for version records.
#[derive(Debug, Clone)]
pub struct PgVersionRepository {
    pool: PgPool,
}

impl PgVersionRepository {
    /// Create a new version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionRepository for PgVersionRepository {
    async fn insert_as_current(&self, version: &Version) -> AppResult<Vec<VersionId>> {
        let row = VersionRow::from(version);
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let cleared: Vec<Uuid> = sqlx::query_scalar(
            "UPDATE document_versions SET is_current = FALSE \
             WHERE doc_id = $1 AND is_current AND version_id <> $2 \
             RETURNING version_id",
        )
        .bind(&row.doc_id)
        .bind(row.version_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clear current flag", e)
        })?;

        sqlx::query(
            "INSERT INTO document_versions (version_id, doc_id, version_number, content, \
             content_hash, parent_version_id, author, created_at, operation, change_summary, \
             lines_added, lines_removed, lines_modified, similarity_score, status, is_current, \
             original_metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, TRUE, $16)",
        )
        .bind(row.version_id)
        .bind(&row.doc_id)
        .bind(row.version_number)
        .bind(&row.content)
        .bind(&row.content_hash)
        .bind(row.parent_version_id)
        .bind(&row.author)
        .bind(row.created_at)
        .bind(&row.operation)
        .bind(&row.change_summary)
        .bind(row.lines_added)
        .bind(row.lines_removed)
        .bind(row.lines_modified)
        .bind(row.similarity_score)
        .bind(&row.status)
        .bind(&row.original_metadata)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert version", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit version", e)
        })?;

        Ok(cleared.into_iter().map(VersionId::from_uuid).collect())
    }

    async fn find_by_id(&self, id: VersionId) -> AppResult<Option<Version>> {
        let row = sqlx::query_as::<_, VersionRow>(
            "SELECT * FROM document_versions WHERE version_id = $1",
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))?;

        row.map(Version::try_from).transpose()
    }

    async fn find_by_document(&self, doc_id: &str) -> AppResult<Vec<Version>> {
        let rows = sqlx::query_as::<_, VersionRow>(
            "SELECT * FROM document_versions WHERE doc_id = $1 ORDER BY version_number DESC",
        )
        .bind(doc_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))?;

        Ok(readable_versions(rows))
    }

    async fn max_version_number(&self, doc_id: &str) -> AppResult<Option<i64>> {
        sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(version_number) FROM document_versions WHERE doc_id = $1",
        )
        .bind(doc_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read max version number", e)
        })
    }

    async fn document_ids(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT doc_id FROM document_versions ORDER BY doc_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    async fn set_current(&self, id: VersionId, is_current: bool) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE document_versions SET is_current = $2 WHERE version_id = $1")
                .bind(id.into_uuid())
                .bind(is_current)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to set current flag", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_status(&self, id: VersionId, status: VersionStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE document_versions SET status = $2 WHERE version_id = $1")
            .bind(id.into_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to set version status", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
