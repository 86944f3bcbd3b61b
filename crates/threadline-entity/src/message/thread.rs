//! Reply-tree structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Message;

/// A node in a reply tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadNode {
    /// Message ID.
    pub id: Uuid,
    /// Sender of the message.
    pub sender_id: Uuid,
    /// Receiver of the message.
    pub receiver_id: Uuid,
    /// Message body.
    pub content: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
    /// Whether the message was edited.
    pub edited: bool,
    /// Direct replies, in discovery order.
    pub children: Vec<ThreadNode>,
}

impl ThreadNode {
    /// Total number of messages in this subtree, including this node.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// IDs of the direct replies, in order.
    pub fn child_ids(&self) -> Vec<Uuid> {
        self.children.iter().map(|c| c.id).collect()
    }
}

// Deep reply chains would otherwise be dropped recursively, one stack
// frame per level.
impl Drop for ThreadNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl From<&Message> for ThreadNode {
    fn from(msg: &Message) -> Self {
        Self {
            id: msg.id,
            sender_id: msg.sender_id,
            receiver_id: msg.receiver_id,
            content: msg.content.clone(),
            created_at: msg.created_at,
            edited: msg.edited,
            children: Vec::new(),
        }
    }
}
