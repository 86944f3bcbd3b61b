//! SQLite connection pool management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::{debug, info};

use threadline_core::config::DatabaseConfig;
use threadline_core::error::{AppError, ErrorKind};
use threadline_core::result::AppResult;

/// A transaction borrowed from the pool. Rolls back when dropped
/// without [`commit_transaction`].
pub type DbTransaction = Transaction<'static, Sqlite>;

/// The connection behind an open [`DbTransaction`].
pub type DbConnection = SqliteConnection;

/// Wrapper around the sqlx SQLite connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// The underlying sqlx connection pool.
    pool: SqlitePool,
}

impl DatabasePool {
    /// Create a new database pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %config.url,
            max_connections = config.max_connections,
            in_memory = config.is_in_memory(),
            "Connecting to SQLite"
        );

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid database URL '{}'", config.url),
                    e,
                )
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_seconds));

        // Every connection to `:memory:` opens a separate, empty database,
        // so an in-memory pool is pinned to a single long-lived connection.
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            options = options.journal_mode(SqliteJournalMode::Wal);
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        info!("Successfully connected to SQLite");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a write transaction. Everything written through it becomes
    /// visible only when [`commit_transaction`] succeeds.
    ///
    /// The write lock is taken up front (`BEGIN IMMEDIATE`), so a second
    /// writer waits out `busy_timeout` at `BEGIN` instead of failing when
    /// it first writes after reading.
    pub async fn begin_write(&self) -> AppResult<DbTransaction> {
        self.pool.begin_with("BEGIN IMMEDIATE").await.map_err(|e| {
            AppError::with_source(
                ErrorKind::TransactionFailure,
                "Failed to begin write transaction",
                e,
            )
        })
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Commit a transaction, reporting failure as [`ErrorKind::TransactionFailure`].
pub async fn commit_transaction(tx: DbTransaction, operation: &str) -> AppResult<()> {
    tx.commit().await.map_err(|e| {
        AppError::with_source(
            ErrorKind::TransactionFailure,
            format!("Failed to commit {operation}"),
            e,
        )
    })?;
    debug!(operation, "Transaction committed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_is_healthy() {
        let db = DatabasePool::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        assert!(db.health_check().await.unwrap());
        db.close().await;
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let db = DatabasePool::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        sqlx::query("CREATE TABLE t (v INTEGER)")
            .execute(db.pool())
            .await
            .unwrap();

        {
            let mut tx = db.begin_write().await.unwrap();
            sqlx::query("INSERT INTO t (v) VALUES (1)")
                .execute(&mut *tx)
                .await
                .unwrap();
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);

        let mut tx = db.begin_write().await.unwrap();
        sqlx::query("INSERT INTO t (v) VALUES (2)")
            .execute(&mut *tx)
            .await
            .unwrap();
        commit_transaction(tx, "insert").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
