//! Message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A message sent from one actor to another, optionally replying to
/// another message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// The actor who sent the message.
    pub sender_id: Uuid,
    /// The actor the message is addressed to.
    pub receiver_id: Uuid,
    /// Message body.
    pub content: String,
    /// When the message was created. Never changes.
    pub created_at: DateTime<Utc>,
    /// Whether the content has been changed at least once.
    pub edited: bool,
    /// The message this one replies to (`None` for root messages).
    pub parent_id: Option<Uuid>,
    /// Whether the receiver has acknowledged the message.
    pub read: bool,
}

impl Message {
    /// Check if this is a root message (not a reply).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if the given actor sent or received this message.
    pub fn involves(&self, actor_id: Uuid) -> bool {
        self.sender_id == actor_id || self.receiver_id == actor_id
    }
}

/// Data required to create a new message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    /// The sender.
    pub sender_id: Uuid,
    /// The receiver.
    pub receiver_id: Uuid,
    /// Message body.
    pub content: String,
    /// Parent message (None for a root message).
    pub parent_id: Option<Uuid>,
}

impl NewMessage {
    /// Materialize the row that will be inserted, assigning a fresh id.
    pub fn into_message(self, created_at: DateTime<Utc>) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            content: self.content,
            created_at,
            edited: false,
            parent_id: self.parent_id,
            read: false,
        }
    }
}
