//! Reduced projection of a message pending acknowledgement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An unread message, without its flags or related entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UnreadMessage {
    /// Message identifier.
    pub id: Uuid,
    /// Message body.
    pub content: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
    /// The sender.
    pub sender_id: Uuid,
    /// The receiver.
    pub receiver_id: Uuid,
    /// Parent message, if this is a reply.
    pub parent_id: Option<Uuid>,
}
