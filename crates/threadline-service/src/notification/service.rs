//! Notification listing and acknowledgement.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use threadline_core::error::AppError;
use threadline_database::repositories::NotificationRepository;
use threadline_entity::notification::Notification;

/// Read and acknowledge surface over dispatched notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Lists a user's notifications, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        self.notif_repo.find_by_user(user_id).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, AppError> {
        self.notif_repo.count_unread(user_id).await
    }

    /// Marks a notification as read.
    pub async fn mark_read(&self, notification_id: Uuid) -> Result<(), AppError> {
        if !self.notif_repo.mark_read(notification_id).await? {
            return Err(AppError::not_found(format!(
                "Notification {notification_id} not found"
            )));
        }

        info!(%notification_id, "Notification marked read");
        Ok(())
    }
}
