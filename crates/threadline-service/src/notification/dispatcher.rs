//! Notification fan-out on message creation.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use threadline_core::result::AppResult;
use threadline_database::DbConnection;
use threadline_database::repositories::NotificationRepository;
use threadline_entity::message::Message;
use threadline_entity::notification::Notification;

/// Creates the single notification that accompanies every new message.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Writes the receiver's notification through the creating transaction.
    ///
    /// Must be called exactly once per message, right after the message row
    /// is inserted and before commit. Edits never dispatch.
    pub async fn on_message_created(
        &self,
        conn: &mut DbConnection,
        message: &Message,
    ) -> AppResult<Notification> {
        let notification = Notification::for_message(message, Utc::now());
        self.notif_repo.insert(conn, &notification).await?;

        debug!(
            notification_id = %notification.id,
            message_id = %message.id,
            user_id = %notification.user_id,
            "Notification dispatched"
        );
        Ok(notification)
    }
}
