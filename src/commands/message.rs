//! Message CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use super::AppContext;
use crate::output::{self, OutputFormat};
use threadline_core::error::AppError;
use threadline_entity::history::EditRecord;
use threadline_entity::message::{Message, UnreadMessage};

/// Arguments for message commands
#[derive(Debug, Args)]
pub struct MessageArgs {
    /// Message subcommand
    #[command(subcommand)]
    pub command: MessageCommand,
}

/// Message subcommands
#[derive(Debug, Subcommand)]
pub enum MessageCommand {
    /// Send a message, optionally as a reply
    Send {
        /// Sending actor
        #[arg(long)]
        from: Uuid,
        /// Receiving actor
        #[arg(long)]
        to: Uuid,
        /// Message this one replies to
        #[arg(long)]
        reply_to: Option<Uuid>,
        /// Message body
        content: String,
    },
    /// Replace a message's content
    Edit {
        /// Message ID
        id: Uuid,
        /// New body
        content: String,
    },
    /// Show one message
    Show {
        /// Message ID
        id: Uuid,
    },
    /// Show the reply tree below a message
    Thread {
        /// Message ID
        id: Uuid,
    },
    /// List unread messages for a receiver
    Unread {
        /// Receiving actor
        receiver: Uuid,
    },
    /// List previous contents of a message
    History {
        /// Message ID
        id: Uuid,
    },
    /// Mark a message as read
    Read {
        /// Message ID
        id: Uuid,
    },
}

/// Message display row for table output
#[derive(Debug, Serialize, Tabled)]
struct MessageRow {
    /// Message ID
    id: String,
    /// Sender
    sender: String,
    /// Receiver
    receiver: String,
    /// Parent
    parent: String,
    /// Content
    content: String,
    /// Edited
    edited: bool,
    /// Read
    read: bool,
    /// Created at
    created_at: String,
}

impl From<&Message> for MessageRow {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id.to_string(),
            sender: m.sender_id.to_string(),
            receiver: m.receiver_id.to_string(),
            parent: m.parent_id.map(|p| p.to_string()).unwrap_or_default(),
            content: m.content.clone(),
            edited: m.edited,
            read: m.read,
            created_at: m.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Unread message display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UnreadRow {
    /// Message ID
    id: String,
    /// Sender
    sender: String,
    /// Parent
    parent: String,
    /// Content
    content: String,
    /// Created at
    created_at: String,
}

impl From<&UnreadMessage> for UnreadRow {
    fn from(m: &UnreadMessage) -> Self {
        Self {
            id: m.id.to_string(),
            sender: m.sender_id.to_string(),
            parent: m.parent_id.map(|p| p.to_string()).unwrap_or_default(),
            content: m.content.clone(),
            created_at: m.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Edit record display row for table output
#[derive(Debug, Serialize, Tabled)]
struct EditRow {
    /// Record ID
    id: String,
    /// Previous content
    old_content: String,
    /// Edited at
    edited_at: String,
}

impl From<&EditRecord> for EditRow {
    fn from(r: &EditRecord) -> Self {
        Self {
            id: r.id.to_string(),
            old_content: r.old_content.clone(),
            edited_at: r.edited_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute message commands
pub async fn execute(
    args: &MessageArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        MessageCommand::Send {
            from,
            to,
            reply_to,
            content,
        } => {
            let message = ctx.messages.create(*from, *to, content, *reply_to).await?;
            output::print_item(&MessageRow::from(&message), format);
        }
        MessageCommand::Edit { id, content } => {
            let message = ctx.messages.edit(*id, content).await?;
            output::print_item(&MessageRow::from(&message), format);
        }
        MessageCommand::Show { id } => {
            let message = ctx.messages.get(*id).await?;
            output::print_item(&MessageRow::from(&message), format);
        }
        MessageCommand::Thread { id } => {
            let tree = ctx.messages.thread_of(*id).await?;
            output::print_thread(&tree, format);
        }
        MessageCommand::Unread { receiver } => {
            let unread = ctx.messages.unread_for(*receiver).await?;
            let rows: Vec<UnreadRow> = unread.iter().map(UnreadRow::from).collect();
            output::print_list(&rows, format);
        }
        MessageCommand::History { id } => {
            let records = ctx.messages.history_of(*id).await?;
            let rows: Vec<EditRow> = records.iter().map(EditRow::from).collect();
            output::print_list(&rows, format);
        }
        MessageCommand::Read { id } => {
            ctx.messages.mark_read(*id).await?;
            output::print_success(&format!("Message {id} marked read"));
        }
    }

    Ok(())
}
