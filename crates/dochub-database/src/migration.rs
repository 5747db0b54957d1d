//! Schema migrations embedded from the workspace `migrations/` directory.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies pending migrations; ones already recorded are skipped.
pub async fn apply(pool: &PgPool) -> AppResult<()> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Schema migration failed: {e}"),
            e,
        )
    })?;
    info!(migrations = MIGRATOR.iter().count(), "Database schema is up to date");
    Ok(())
}
