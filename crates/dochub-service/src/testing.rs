//! Fully wired in-memory services for unit tests.

use std::sync::Arc;

use dochub_cache::VersionCache;
use dochub_core::config::AppConfig;
use dochub_database::memory::{MemoryDocumentStore, MemoryVersionRepository};
use dochub_database::traits::DocumentMetadataProvider;
use dochub_entity::document::DocumentMetadata;
use dochub_entity::version::{NewVersion, Version, VersionOperation};

use crate::conflict::ConflictService;
use crate::diff::DiffEngine;
use crate::rollback::RollbackService;
use crate::validation::Validator;
use crate::version::VersionStore;

pub(crate) struct Harness {
    pub repo: Arc<MemoryVersionRepository>,
    pub documents: Arc<MemoryDocumentStore>,
    pub cache: VersionCache,
    pub store: Arc<VersionStore>,
    pub conflicts: ConflictService,
    pub rollback: RollbackService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let repo = Arc::new(MemoryVersionRepository::new());
        let documents = Arc::new(MemoryDocumentStore::new(config.index.clone()));
        let cache = VersionCache::in_memory(&config.cache);
        let validator = Validator::new(&config.versioning, &config.rollback);
        let diff = DiffEngine::new(&config.versioning);

        let store = Arc::new(VersionStore::new(
            repo.clone(),
            documents.clone(),
            documents.clone(),
            cache.clone(),
            validator.clone(),
            diff,
        ));
        let conflicts = ConflictService::new(store.clone(), cache.clone());
        let rollback = RollbackService::new(store.clone(), validator, &config.rollback)
            .expect("valid rollback config");

        Self {
            repo,
            documents,
            cache,
            store,
            conflicts,
            rollback,
        }
    }

    pub async fn register(&self, doc_id: &str) {
        self.documents
            .register_document(&DocumentMetadata::new(doc_id, "Test document", "markdown"))
            .await
            .expect("register document");
    }

    /// Creates a version parented to the current one, if any.
    pub async fn commit(&self, doc_id: &str, content: &str) -> Version {
        let current = self.store.get_current_version(doc_id).await;
        let new = match current {
            Some(current) => NewVersion::new(doc_id, content, "alice", VersionOperation::Update)
                .with_summary("edit")
                .with_parent(current.version_id),
            None => NewVersion::new(doc_id, content, "alice", VersionOperation::Create),
        };
        self.store.create_version(new).await.expect("create version")
    }
}
