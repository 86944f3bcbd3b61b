//! CLI command definitions and dispatch.

pub mod actor;
pub mod message;
pub mod migrate;
pub mod notification;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use threadline_core::config::AppConfig;
use threadline_core::error::AppError;
use threadline_database::DatabasePool;
use threadline_database::migration::run_migrations;
use threadline_database::repositories::{
    EditRecordRepository, MessageRepository, NotificationRepository,
};
use threadline_service::{MessageService, NotificationService};

/// Threadline — threaded messages with notifications and edit history
#[derive(Debug, Parser)]
#[command(name = "threadline", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Send, edit and browse messages
    Message(message::MessageArgs),
    /// Notification inbox
    Notification(notification::NotificationArgs),
    /// Actor lifecycle
    Actor(actor::ActorArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        create_data_directory(config).await?;
        let db = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &db).await,
            Commands::Message(args) => {
                let ctx = AppContext::open(db.clone(), config).await?;
                message::execute(args, &ctx, self.format).await
            }
            Commands::Notification(args) => {
                let ctx = AppContext::open(db.clone(), config).await?;
                notification::execute(args, &ctx, self.format).await
            }
            Commands::Actor(args) => {
                let ctx = AppContext::open(db.clone(), config).await?;
                actor::execute(args, &ctx, self.format).await
            }
        };

        db.close().await;
        result
    }
}

/// Create the directory holding the database file, if any.
async fn create_data_directory(config: &AppConfig) -> Result<(), AppError> {
    let Some(dir) = config
        .database
        .file_path()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .filter(|d| !d.as_os_str().is_empty())
    else {
        return Ok(());
    };

    tokio::fs::create_dir_all(&dir).await.map_err(|e| {
        AppError::internal(format!("Failed to create dir '{}': {e}", dir.display()))
    })
}

/// Services wired against one database pool.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Message lifecycle operations.
    pub messages: MessageService,
    /// Notification inbox operations.
    pub notifications: NotificationService,
}

impl AppContext {
    /// Apply pending migrations and build the services.
    pub async fn open(db: DatabasePool, config: &AppConfig) -> Result<Self, AppError> {
        run_migrations(db.pool()).await?;

        let message_repo = Arc::new(MessageRepository::new(db.pool().clone()));
        let notif_repo = Arc::new(NotificationRepository::new(db.pool().clone()));
        let edit_repo = Arc::new(EditRecordRepository::new(db.pool().clone()));

        Ok(Self {
            notifications: NotificationService::new(Arc::clone(&notif_repo)),
            messages: MessageService::new(
                db,
                message_repo,
                notif_repo,
                edit_repo,
                &config.messaging,
            ),
        })
    }
}
