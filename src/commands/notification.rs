//! Notification CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use super::AppContext;
use crate::output::{self, OutputFormat};
use threadline_core::error::AppError;
use threadline_entity::notification::Notification;

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// List a user's notifications, newest first
    List {
        /// User ID
        user: Uuid,
    },
    /// Mark a notification as read
    Read {
        /// Notification ID
        id: Uuid,
    },
}

/// Notification display row for table output
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Message ID
    message: String,
    /// Read
    read: bool,
    /// Created at
    created_at: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            message: n.message_id.to_string(),
            read: n.is_read,
            created_at: n.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        NotificationCommand::List { user } => {
            let notifications = ctx.notifications.list_for_user(*user).await?;
            let rows: Vec<NotificationRow> =
                notifications.iter().map(NotificationRow::from).collect();
            output::print_list(&rows, format);

            if format == OutputFormat::Table {
                let unread = ctx.notifications.unread_count(*user).await?;
                output::print_kv("Unread", &unread.to_string());
            }
        }
        NotificationCommand::Read { id } => {
            ctx.notifications.mark_read(*id).await?;
            output::print_success(&format!("Notification {id} marked read"));
        }
    }

    Ok(())
}
