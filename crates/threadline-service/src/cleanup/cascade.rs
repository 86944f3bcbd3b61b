//! Cascading deletion of everything that references a removed actor.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use threadline_core::result::AppResult;
use threadline_database::repositories::{
    EditRecordRepository, MessageRepository, NotificationRepository,
};
use threadline_database::{DatabasePool, commit_transaction};
use threadline_entity::actor::RemovalReport;

/// Deletes an actor's messages (with all replies beneath them) and every
/// notification and edit record depending on them, atomically.
#[derive(Debug, Clone)]
pub struct CascadeCleaner {
    /// Database pool, for the cleanup transaction.
    db: DatabasePool,
    /// Message repository.
    message_repo: Arc<MessageRepository>,
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
    /// Edit record repository.
    edit_repo: Arc<EditRecordRepository>,
}

impl CascadeCleaner {
    /// Creates a new cleaner.
    pub fn new(
        db: DatabasePool,
        message_repo: Arc<MessageRepository>,
        notif_repo: Arc<NotificationRepository>,
        edit_repo: Arc<EditRecordRepository>,
    ) -> Self {
        Self {
            db,
            message_repo,
            notif_repo,
            edit_repo,
        }
    }

    /// Removes all records depending on `actor_id` in one transaction.
    ///
    /// Dependents go first so the message foreign keys hold at every
    /// statement. Any failure rolls the whole cleanup back and is returned
    /// as-is; the actor itself must not be removed until this succeeds.
    pub async fn on_actor_removed(&self, actor_id: Uuid) -> AppResult<RemovalReport> {
        let mut tx = self.db.begin_write().await?;
        let mut report = RemovalReport::new(actor_id);

        report.edit_records_removed = self.edit_repo.delete_for_actor(&mut tx, actor_id).await?;
        report.notifications_removed = self.notif_repo.delete_for_actor(&mut tx, actor_id).await?;
        report.messages_removed = self.message_repo.delete_for_actor(&mut tx, actor_id).await?;

        commit_transaction(tx, "actor cleanup").await?;

        info!(
            %actor_id,
            messages = report.messages_removed,
            notifications = report.notifications_removed,
            edit_records = report.edit_records_removed,
            "Actor records removed"
        );
        Ok(report)
    }
}
