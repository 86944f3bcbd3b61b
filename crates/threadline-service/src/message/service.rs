//! Message creation, editing, and actor removal.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use threadline_core::config::MessagingConfig;
use threadline_core::error::AppError;
use threadline_database::repositories::{
    EditRecordRepository, MessageRepository, NotificationRepository,
};
use threadline_database::{DatabasePool, commit_transaction};
use threadline_entity::actor::RemovalReport;
use threadline_entity::history::EditRecord;
use threadline_entity::message::{Message, NewMessage, ThreadNode, UnreadMessage};

use super::history::EditHistoryRecorder;
use super::policy::ContentPolicy;
use super::thread::ThreadBuilder;
use super::unread::UnreadView;
use crate::cleanup::CascadeCleaner;
use crate::notification::NotificationDispatcher;

/// Entry point for every message mutation.
///
/// Each mutation runs its side effects explicitly, inside the same
/// transaction as the write that triggers them.
#[derive(Debug, Clone)]
pub struct MessageService {
    /// Database pool, for mutation transactions.
    db: DatabasePool,
    /// Message repository.
    message_repo: Arc<MessageRepository>,
    /// Edit record repository.
    edit_repo: Arc<EditRecordRepository>,
    /// Content validation.
    policy: ContentPolicy,
    /// Captures prior content on edits.
    history: EditHistoryRecorder,
    /// Notifies receivers of new messages.
    dispatcher: NotificationDispatcher,
    /// Removes dependents of deleted actors.
    cleaner: CascadeCleaner,
    /// Reply-tree reads.
    threads: ThreadBuilder,
    /// Unread projection reads.
    unread: UnreadView,
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(
        db: DatabasePool,
        message_repo: Arc<MessageRepository>,
        notif_repo: Arc<NotificationRepository>,
        edit_repo: Arc<EditRecordRepository>,
        config: &MessagingConfig,
    ) -> Self {
        Self {
            policy: ContentPolicy::new(config),
            history: EditHistoryRecorder::new(Arc::clone(&edit_repo)),
            dispatcher: NotificationDispatcher::new(Arc::clone(&notif_repo)),
            cleaner: CascadeCleaner::new(
                db.clone(),
                Arc::clone(&message_repo),
                notif_repo,
                Arc::clone(&edit_repo),
            ),
            threads: ThreadBuilder::new(Arc::clone(&message_repo)),
            unread: UnreadView::new(Arc::clone(&message_repo)),
            db,
            message_repo,
            edit_repo,
        }
    }

    /// Creates a message and its receiver notification atomically.
    ///
    /// A `parent_id` must reference an existing message. If the
    /// notification cannot be written, nothing is committed.
    pub async fn create(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Message, AppError> {
        self.policy.validate(content)?;

        let mut tx = self.db.begin_write().await?;

        if let Some(parent_id) = parent_id {
            if self.message_repo.find_by_id_in(&mut tx, parent_id).await?.is_none() {
                warn!(%parent_id, "Rejected reply to unknown message");
                return Err(AppError::validation(format!(
                    "Parent message {parent_id} does not exist"
                )));
            }
        }

        let message = NewMessage {
            sender_id,
            receiver_id,
            content: content.to_string(),
            parent_id,
        }
        .into_message(Utc::now());

        self.message_repo.insert(&mut tx, &message).await?;
        let notification = self.dispatcher.on_message_created(&mut tx, &message).await?;

        commit_transaction(tx, "message creation").await?;

        info!(
            message_id = %message.id,
            %sender_id,
            %receiver_id,
            parent_id = ?message.parent_id,
            notification_id = %notification.id,
            "Message created"
        );
        Ok(message)
    }

    /// Replaces a message's content.
    ///
    /// When the content actually changes, the previous content is recorded
    /// and the message is flagged as edited, in one transaction. A no-op
    /// edit records nothing and returns the message unchanged.
    ///
    /// An unknown `message_id` is reported as `NotFound` before the new
    /// content is validated.
    pub async fn edit(&self, message_id: Uuid, new_content: &str) -> Result<Message, AppError> {
        let mut tx = self.db.begin_write().await?;

        let existing = self
            .message_repo
            .find_by_id_in(&mut tx, message_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Message {message_id} not found")))?;

        self.policy.validate(new_content)?;

        let Some(record) = self
            .history
            .before_update(&mut tx, &existing, new_content)
            .await?
        else {
            return Ok(existing);
        };

        let applied = self
            .message_repo
            .update_content(&mut tx, message_id, &existing.content, new_content)
            .await?;
        if !applied {
            return Err(AppError::transaction_failure(format!(
                "Message {message_id} was modified concurrently"
            )));
        }

        commit_transaction(tx, "message edit").await?;

        info!(%message_id, edit_id = %record.id, "Message edited");
        Ok(Message {
            content: new_content.to_string(),
            edited: true,
            ..existing
        })
    }

    /// Removes everything that depends on an actor. See [`CascadeCleaner`].
    pub async fn remove_actor(&self, actor_id: Uuid) -> Result<RemovalReport, AppError> {
        self.cleaner.on_actor_removed(actor_id).await
    }

    /// Builds the reply tree below a message.
    pub async fn thread_of(&self, root_id: Uuid) -> Result<ThreadNode, AppError> {
        self.threads.build_thread(root_id).await
    }

    /// Lists unread messages addressed to a receiver.
    pub async fn unread_for(&self, receiver_id: Uuid) -> Result<Vec<UnreadMessage>, AppError> {
        self.unread.unread_for(receiver_id).await
    }

    /// Gets a message by ID.
    pub async fn get(&self, message_id: Uuid) -> Result<Message, AppError> {
        self.message_repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Message {message_id} not found")))
    }

    /// Marks a message as read by its receiver.
    pub async fn mark_read(&self, message_id: Uuid) -> Result<Message, AppError> {
        if !self.message_repo.mark_read(message_id).await? {
            return Err(AppError::not_found(format!("Message {message_id} not found")));
        }

        info!(%message_id, "Message marked read");
        self.get(message_id).await
    }

    /// Lists the edit history of a message, newest first.
    pub async fn history_of(&self, message_id: Uuid) -> Result<Vec<EditRecord>, AppError> {
        self.get(message_id).await?;
        self.edit_repo.find_by_message(message_id).await
    }
}
