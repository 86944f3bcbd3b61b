//! Message repository implementation.

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use threadline_core::error::{AppError, ErrorKind};
use threadline_core::result::AppResult;
use threadline_entity::message::{Message, UnreadMessage};

/// Repository for message rows, reply trees, and the unread projection.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a message by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Message>> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find message", e))
    }

    /// Load a message and every transitive reply in one query, in
    /// insertion order. Empty if the message does not exist.
    pub async fn find_thread(&self, root_id: Uuid) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "WITH RECURSIVE thread(id) AS ( \
                SELECT id FROM messages WHERE id = ?1 \
                UNION \
                SELECT m.id FROM messages m INNER JOIN thread t ON m.parent_id = t.id \
             ) SELECT m.* FROM messages m WHERE m.id IN (SELECT id FROM thread) ORDER BY m.rowid ASC",
        )
        .bind(root_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load thread", e))
    }

    /// Unread messages addressed to a receiver, in insertion order.
    pub async fn find_unread_for(&self, receiver_id: Uuid) -> AppResult<Vec<UnreadMessage>> {
        sqlx::query_as::<_, UnreadMessage>(
            "SELECT id, content, created_at, sender_id, receiver_id, parent_id \
             FROM messages WHERE receiver_id = ?1 AND read = FALSE ORDER BY rowid ASC",
        )
        .bind(receiver_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list unread messages", e))
    }

    /// Mark a message as read. Returns `false` if it does not exist.
    pub async fn mark_read(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("UPDATE messages SET read = TRUE WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark message read", e))?;
        Ok(result.rows_affected() == 1)
    }

    /// Count messages an actor sent or received.
    pub async fn count_involving(&self, actor_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE sender_id = ?1 OR receiver_id = ?1")
            .bind(actor_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count messages", e))
    }

    /// Find a message by ID inside an open transaction.
    pub async fn find_by_id_in(
        &self,
        conn: &mut SqliteConnection,
        id: Uuid,
    ) -> AppResult<Option<Message>> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::TransactionFailure, "Failed to read message", e)
            })
    }

    /// Insert a message row.
    pub async fn insert(&self, conn: &mut SqliteConnection, message: &Message) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO messages (id, sender_id, receiver_id, content, created_at, edited, parent_id, read) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(message.id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.content)
        .bind(message.created_at)
        .bind(message.edited)
        .bind(message.parent_id)
        .bind(message.read)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::TransactionFailure, "Failed to insert message", e)
        })?;
        Ok(())
    }

    /// Replace a message's content and flag it as edited, but only if the
    /// stored content still equals `expected`. Returns `false` when another
    /// writer changed (or removed) the message first.
    pub async fn update_content(
        &self,
        conn: &mut SqliteConnection,
        id: Uuid,
        expected: &str,
        content: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE messages SET content = ?3, edited = TRUE WHERE id = ?1 AND content = ?2",
        )
        .bind(id)
        .bind(expected)
        .bind(content)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::TransactionFailure, "Failed to update message", e)
        })?;
        Ok(result.rows_affected() == 1)
    }

    /// Delete every message an actor sent or received, plus all replies
    /// beneath them. Dependents must already be gone.
    pub async fn delete_for_actor(
        &self,
        conn: &mut SqliteConnection,
        actor_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(concat!(
            actor_messages_cte!(),
            "DELETE FROM messages WHERE id IN (SELECT id FROM doomed)"
        ))
        .bind(actor_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::TransactionFailure, "Failed to delete messages", e)
        })?;
        Ok(result.rows_affected())
    }
}
