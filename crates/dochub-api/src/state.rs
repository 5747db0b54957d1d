//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use dochub_cache::VersionCache;
use dochub_core::config::AppConfig;
use dochub_core::result::AppResult;
use dochub_database::DatabasePool;
use dochub_database::memory::{MemoryDocumentStore, MemoryVersionRepository};
use dochub_database::postgres::{PgDocumentStore, PgVersionRepository};
use dochub_database::traits::{ContentIndex, DocumentMetadataProvider, VersionRepository};
use dochub_service::{ConflictService, DiffEngine, RollbackService, Validator, VersionStore};

/// Storage collaborators the services are built on.
#[derive(Debug, Clone)]
pub struct Backends {
    /// Backend name reported by the health endpoint.
    pub name: &'static str,
    /// Version persistence.
    pub versions: Arc<dyn VersionRepository>,
    /// Document metadata.
    pub documents: Arc<dyn DocumentMetadataProvider>,
    /// Content index.
    pub index: Arc<dyn ContentIndex>,
    /// Pool behind the postgres backend, pinged by the health endpoint.
    pub database: Option<DatabasePool>,
}

impl Backends {
    /// Process-local storage; everything is lost on restart.
    pub fn memory(config: &AppConfig) -> Self {
        let documents = Arc::new(MemoryDocumentStore::new(config.index.clone()));
        Self {
            name: "memory",
            versions: Arc::new(MemoryVersionRepository::new()),
            documents: documents.clone(),
            index: documents,
            database: None,
        }
    }

    /// PostgreSQL storage over an opened pool.
    pub fn postgres(database: DatabasePool, config: &AppConfig) -> Self {
        let pool = database.pool().clone();
        let documents = Arc::new(PgDocumentStore::new(pool.clone(), config.index.clone()));
        Self {
            name: "postgres",
            versions: Arc::new(PgVersionRepository::new(pool)),
            documents: documents.clone(),
            index: documents,
            database: Some(database),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Storage backend name
    pub backend: &'static str,
    /// Database pool, absent for the in-memory backend
    pub database: Option<DatabasePool>,
    /// Document metadata provider
    pub documents: Arc<dyn DocumentMetadataProvider>,
    /// Version store
    pub versions: Arc<VersionStore>,
    /// Conflict detection and resolution
    pub conflicts: Arc<ConflictService>,
    /// Rollback safety and execution
    pub rollback: Arc<RollbackService>,
}

impl AppState {
    /// Wires the services on top of the given backends.
    pub fn new(config: AppConfig, backends: Backends) -> AppResult<Self> {
        let cache = VersionCache::in_memory(&config.cache);
        let validator = Validator::new(&config.versioning, &config.rollback);
        let diff = DiffEngine::new(&config.versioning);

        let versions = Arc::new(VersionStore::new(
            backends.versions,
            Arc::clone(&backends.documents),
            backends.index,
            cache.clone(),
            validator.clone(),
            diff,
        ));
        let conflicts = Arc::new(ConflictService::new(Arc::clone(&versions), cache));
        let rollback = Arc::new(RollbackService::new(
            Arc::clone(&versions),
            validator,
            &config.rollback,
        )?);

        Ok(Self {
            config: Arc::new(config),
            backend: backends.name,
            database: backends.database,
            documents: backends.documents,
            versions,
            conflicts,
            rollback,
        })
    }
}
