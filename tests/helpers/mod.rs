//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use threadline_core::config::{DatabaseConfig, MessagingConfig};
use threadline_database::DatabasePool;
use threadline_database::repositories::{
    EditRecordRepository, MessageRepository, NotificationRepository,
};
use threadline_entity::message::Message;
use threadline_service::{MessageService, NotificationService};

/// Test application context over a private in-memory database.
pub struct TestContext {
    /// Database pool for direct queries
    pub db: DatabasePool,
    /// Message repository
    pub message_repo: Arc<MessageRepository>,
    /// Notification repository
    pub notif_repo: Arc<NotificationRepository>,
    /// Edit record repository
    pub edit_repo: Arc<EditRecordRepository>,
    /// Message service under test
    pub messages: MessageService,
    /// Notification service under test
    pub notifications: NotificationService,
}

impl TestContext {
    /// Create a migrated in-memory database and wire the services.
    pub async fn new() -> Self {
        Self::with_messaging(MessagingConfig::default()).await
    }

    /// Same as [`TestContext::new`] with custom messaging limits.
    pub async fn with_messaging(messaging: MessagingConfig) -> Self {
        Self::with_config(DatabaseConfig::in_memory(), messaging).await
    }

    /// A pooled, WAL-mode database file inside `dir`.
    pub async fn file_backed(dir: &Path, max_connections: u32) -> Self {
        let database = DatabaseConfig {
            url: format!("sqlite://{}", dir.join("threadline.db").display()),
            max_connections,
            ..DatabaseConfig::default()
        };
        Self::with_config(database, MessagingConfig::default()).await
    }

    /// Connect with explicit configuration and wire the services.
    pub async fn with_config(database: DatabaseConfig, messaging: MessagingConfig) -> Self {
        let db = DatabasePool::connect(&database)
            .await
            .expect("Failed to connect to test database");

        threadline_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let message_repo = Arc::new(MessageRepository::new(db.pool().clone()));
        let notif_repo = Arc::new(NotificationRepository::new(db.pool().clone()));
        let edit_repo = Arc::new(EditRecordRepository::new(db.pool().clone()));

        let messages = MessageService::new(
            db.clone(),
            Arc::clone(&message_repo),
            Arc::clone(&notif_repo),
            Arc::clone(&edit_repo),
            &messaging,
        );
        let notifications = NotificationService::new(Arc::clone(&notif_repo));

        Self {
            db,
            message_repo,
            notif_repo,
            edit_repo,
            messages,
            notifications,
        }
    }

    /// Raw pool for assertions.
    pub fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }

    /// Send a message, failing the test on error.
    pub async fn send(
        &self,
        from: Uuid,
        to: Uuid,
        content: &str,
        parent: Option<&Message>,
    ) -> Message {
        self.messages
            .create(from, to, content, parent.map(|p| p.id))
            .await
            .expect("Failed to create message")
    }

    /// Number of rows in a table.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.pool())
            .await
            .expect("Failed to count rows")
    }
}
