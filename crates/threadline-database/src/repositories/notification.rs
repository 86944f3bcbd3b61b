//! Notification repository implementation.

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use threadline_core::error::{AppError, ErrorKind};
use threadline_core::result::AppResult;
use threadline_entity::notification::Notification;

/// Repository for notification CRUD operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a notification by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    /// List notifications for a user, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = ?1 ORDER BY rowid DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    /// List notifications attached to a message.
    pub async fn find_by_message(&self, message_id: Uuid) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE message_id = ?1 ORDER BY rowid ASC",
        )
        .bind(message_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = ?1 AND is_read = FALSE")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark a notification as read. Returns `false` if it does not exist.
    pub async fn mark_read(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected() == 1)
    }

    /// Insert a notification row.
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        notification: &Notification,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO notifications (id, user_id, message_id, is_read, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(notification.message_id)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::TransactionFailure,
                "Failed to create notification",
                e,
            )
        })?;
        Ok(())
    }

    /// Delete notifications addressed to an actor or attached to any
    /// message that the actor's removal takes down.
    pub async fn delete_for_actor(
        &self,
        conn: &mut SqliteConnection,
        actor_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(concat!(
            actor_messages_cte!(),
            "DELETE FROM notifications WHERE user_id = ?1 OR message_id IN (SELECT id FROM doomed)"
        ))
        .bind(actor_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::TransactionFailure,
                "Failed to delete notifications",
                e,
            )
        })?;
        Ok(result.rows_affected())
    }
}
