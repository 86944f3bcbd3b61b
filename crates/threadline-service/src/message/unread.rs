//! Unread message projection.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use threadline_core::result::AppResult;
use threadline_database::repositories::MessageRepository;
use threadline_entity::message::UnreadMessage;

/// Read-only view of the messages a receiver has not acknowledged yet.
#[derive(Debug, Clone)]
pub struct UnreadView {
    /// Message repository.
    message_repo: Arc<MessageRepository>,
}

impl UnreadView {
    /// Creates a new unread view.
    pub fn new(message_repo: Arc<MessageRepository>) -> Self {
        Self { message_repo }
    }

    /// Unread messages addressed to `receiver_id`, in insertion order.
    pub async fn unread_for(&self, receiver_id: Uuid) -> AppResult<Vec<UnreadMessage>> {
        let unread = self.message_repo.find_unread_for(receiver_id).await?;
        debug!(%receiver_id, count = unread.len(), "Loaded unread messages");
        Ok(unread)
    }
}
