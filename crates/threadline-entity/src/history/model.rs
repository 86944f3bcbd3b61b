//! Edit record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The content a message had before one of its edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EditRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The edited message.
    pub message_id: Uuid,
    /// Content immediately before the overwrite.
    pub old_content: String,
    /// When the edit happened.
    pub edited_at: DateTime<Utc>,
}

impl EditRecord {
    /// Capture the content being replaced.
    pub fn capture(message_id: Uuid, old_content: impl Into<String>, edited_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message_id,
            old_content: old_content.into(),
            edited_at,
        }
    }
}
