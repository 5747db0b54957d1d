//! Document metadata and chunk index backed by `documents` / `document_chunks`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use dochub_core::config::IndexConfig;
use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_entity::document::{DocumentMetadata, DocumentUpdate};

use super::row::DocumentRow;
use crate::chunking::chunk_content;
use crate::traits::{ContentIndex, DocumentMetadataProvider};

/// Document store sharing the database with the document service.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    index: IndexConfig,
}

impl PgDocumentStore {
    /// Create a new document store.
    pub fn new(pool: PgPool, index: IndexConfig) -> Self {
        Self { pool, index }
    }
}

#[async_trait]
impl DocumentMetadataProvider for PgDocumentStore {
    async fn get_document(&self, doc_id: &str) -> AppResult<Option<DocumentMetadata>> {
        let row = sqlx::query_as::<_, DocumentRow>("SELECT * FROM documents WHERE doc_id = $1")
            .bind(doc_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))?;
        Ok(row.map(DocumentMetadata::from))
    }

    async fn update_document_metadata(
        &self,
        doc_id: &str,
        update: &DocumentUpdate,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE documents SET \
             last_modified = COALESCE($2, last_modified), \
             last_modified_by = COALESCE($3, last_modified_by), \
             current_version_id = COALESCE($4, current_version_id), \
             current_version_number = COALESCE($5, current_version_number) \
             WHERE doc_id = $1",
        )
        .bind(doc_id)
        .bind(update.last_modified)
        .bind(&update.last_modified_by)
        .bind(update.current_version_id.map(|id| id.into_uuid()))
        .bind(update.current_version_number)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update document metadata", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn register_document(&self, metadata: &DocumentMetadata) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO documents (doc_id, title, doc_type, created_at, extra) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (doc_id) DO UPDATE SET title = EXCLUDED.title, \
             doc_type = EXCLUDED.doc_type, extra = EXCLUDED.extra",
        )
        .bind(&metadata.doc_id)
        .bind(&metadata.title)
        .bind(&metadata.doc_type)
        .bind(metadata.created_at)
        .bind(&metadata.extra)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to register document", e))?;
        Ok(())
    }
}

#[async_trait]
impl ContentIndex for PgDocumentStore {
    async fn replace_document_chunks(&self, doc_id: &str, content: &str) -> AppResult<usize> {
        let chunks = chunk_content(content, self.index.chunk_size, self.index.chunk_overlap);

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM document_chunks WHERE doc_id = $1")
            .bind(doc_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to drop chunks", e))?;

        for (index, chunk) in chunks.iter().enumerate() {
            sqlx::query(
                "INSERT INTO document_chunks (doc_id, chunk_index, content) VALUES ($1, $2, $3)",
            )
            .bind(doc_id)
            .bind(index as i32)
            .bind(chunk)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write chunk", e))?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit chunks", e)
        })?;

        debug!(doc_id, chunks = chunks.len(), "Replaced document chunks");
        Ok(chunks.len())
    }
}
