//! Edit-history capture.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use threadline_core::result::AppResult;
use threadline_database::DbConnection;
use threadline_database::repositories::EditRecordRepository;
use threadline_entity::history::EditRecord;
use threadline_entity::message::Message;

/// Records the content a message had before an edit overwrites it.
#[derive(Debug, Clone)]
pub struct EditHistoryRecorder {
    /// Edit record repository.
    edit_repo: Arc<EditRecordRepository>,
}

impl EditHistoryRecorder {
    /// Creates a new recorder.
    pub fn new(edit_repo: Arc<EditRecordRepository>) -> Self {
        Self { edit_repo }
    }

    /// Runs inside the edit transaction, before the new content is written.
    ///
    /// Returns the record when `incoming` differs byte-for-byte from the
    /// stored content, and `None` for a no-op edit. The caller must only
    /// set the `edited` flag and write the content when a record was made.
    pub async fn before_update(
        &self,
        conn: &mut DbConnection,
        existing: &Message,
        incoming: &str,
    ) -> AppResult<Option<EditRecord>> {
        if existing.content == incoming {
            debug!(message_id = %existing.id, "Edit leaves content unchanged, nothing recorded");
            return Ok(None);
        }

        let record = EditRecord::capture(existing.id, existing.content.as_str(), Utc::now());
        self.edit_repo.insert(conn, &record).await?;

        debug!(
            message_id = %existing.id,
            edit_id = %record.id,
            "Captured previous message content"
        );
        Ok(Some(record))
    }
}
