//! In-memory document metadata provider and content index.

use async_trait::async_trait;
use dashmap::DashMap;

use dochub_core::config::IndexConfig;
use dochub_core::result::AppResult;
use dochub_entity::document::{DocumentMetadata, DocumentUpdate};

use crate::chunking::chunk_content;
use crate::traits::{ContentIndex, DocumentMetadataProvider};

/// Document metadata and indexed chunks held in concurrent maps.
#[derive(Debug)]
pub struct MemoryDocumentStore {
    documents: DashMap<String, DocumentMetadata>,
    chunks: DashMap<String, Vec<String>>,
    index: IndexConfig,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new(index: IndexConfig) -> Self {
        Self {
            documents: DashMap::new(),
            chunks: DashMap::new(),
            index,
        }
    }

    /// The chunks currently indexed for a document.
    pub fn chunks(&self, doc_id: &str) -> Vec<String> {
        self.chunks
            .get(doc_id)
            .map(|c| c.value().clone())
            .unwrap_or_default()
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

#[async_trait]
impl DocumentMetadataProvider for MemoryDocumentStore {
    async fn get_document(&self, doc_id: &str) -> AppResult<Option<DocumentMetadata>> {
        Ok(self.documents.get(doc_id).map(|d| d.value().clone()))
    }

    async fn update_document_metadata(
        &self,
        doc_id: &str,
        update: &DocumentUpdate,
    ) -> AppResult<bool> {
        Ok(match self.documents.get_mut(doc_id) {
            Some(mut doc) => {
                doc.apply(update);
                true
            }
            None => false,
        })
    }

    async fn register_document(&self, metadata: &DocumentMetadata) -> AppResult<()> {
        self.documents
            .insert(metadata.doc_id.clone(), metadata.clone());
        Ok(())
    }
}

#[async_trait]
impl ContentIndex for MemoryDocumentStore {
    async fn replace_document_chunks(&self, doc_id: &str, content: &str) -> AppResult<usize> {
        let chunks = chunk_content(content, self.index.chunk_size, self.index.chunk_overlap);
        let count = chunks.len();
        self.chunks.insert(doc_id.to_string(), chunks);
        Ok(count)
    }
}
