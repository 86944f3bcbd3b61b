//! Embedded schema migrations.

use serde::Serialize;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use tracing::info;

use threadline_core::error::{AppError, ErrorKind};

/// Migrations compiled into the binary from the workspace `migrations/` dir.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// A migration known to the binary but not yet applied to the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingMigration {
    /// Migration version (the timestamp prefix of the file name).
    pub version: i64,
    /// Description taken from the file name.
    pub description: String,
}

/// Run all pending database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    let pending = pending_migrations(pool).await?;
    if pending.is_empty() {
        info!("Database schema is up to date");
        return Ok(());
    }

    info!(count = pending.len(), "Applying database migrations");
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!(
        latest = pending.last().map(|m| m.version),
        "Database migrations applied"
    );
    Ok(())
}

/// List embedded migrations that have not been applied yet, oldest first.
///
/// Read-only: a database that was never migrated reports every migration
/// as pending without creating the bookkeeping table.
pub async fn pending_migrations(pool: &SqlitePool) -> Result<Vec<PendingMigration>, AppError> {
    let tracked: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations')",
    )
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to inspect schema", e))?;

    let applied: Vec<i64> = if tracked {
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success = TRUE")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list applied migrations", e)
            })?
    } else {
        Vec::new()
    };

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.contains(&m.version))
        .map(|m| PendingMigration {
            version: m.version,
            description: m.description.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DatabasePool;
    use threadline_core::config::DatabaseConfig;

    #[tokio::test]
    async fn test_pending_until_applied() {
        let db = DatabasePool::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap();

        let pending = pending_migrations(db.pool()).await.unwrap();
        assert!(!pending.is_empty());
        assert_eq!(pending[0].description, "create messaging tables");

        run_migrations(db.pool()).await.unwrap();
        assert!(pending_migrations(db.pool()).await.unwrap().is_empty());

        // Second run is a no-op.
        run_migrations(db.pool()).await.unwrap();
    }
}
