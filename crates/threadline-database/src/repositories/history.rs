//! Edit record repository implementation.

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use threadline_core::error::{AppError, ErrorKind};
use threadline_core::result::AppResult;
use threadline_entity::history::EditRecord;

/// Repository for message edit history.
#[derive(Debug, Clone)]
pub struct EditRecordRepository {
    pool: SqlitePool,
}

impl EditRecordRepository {
    /// Create a new edit record repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List the edit history of a message, newest first.
    pub async fn find_by_message(&self, message_id: Uuid) -> AppResult<Vec<EditRecord>> {
        sqlx::query_as::<_, EditRecord>(
            "SELECT * FROM message_edits WHERE message_id = ?1 ORDER BY rowid DESC",
        )
        .bind(message_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list edit history", e))
    }

    /// Count edit records of a message.
    pub async fn count_by_message(&self, message_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM message_edits WHERE message_id = ?1")
            .bind(message_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count edits", e))
    }

    /// Insert an edit record.
    pub async fn insert(&self, conn: &mut SqliteConnection, record: &EditRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO message_edits (id, message_id, old_content, edited_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(record.id)
        .bind(record.message_id)
        .bind(&record.old_content)
        .bind(record.edited_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::TransactionFailure, "Failed to record edit", e)
        })?;
        Ok(())
    }

    /// Delete the history of every message the actor's removal takes down.
    pub async fn delete_for_actor(
        &self,
        conn: &mut SqliteConnection,
        actor_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(concat!(
            actor_messages_cte!(),
            "DELETE FROM message_edits WHERE message_id IN (SELECT id FROM doomed)"
        ))
        .bind(actor_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::TransactionFailure, "Failed to delete edit history", e)
        })?;
        Ok(result.rows_affected())
    }
}
