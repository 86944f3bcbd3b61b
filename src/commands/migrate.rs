//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use threadline_core::error::AppError;
use threadline_database::DatabasePool;
use threadline_database::migration::{pending_migrations, run_migrations};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check connectivity and list migrations not yet applied
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, db: &DatabasePool) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            run_migrations(db.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Check => {
            if !db.health_check().await? {
                return Err(AppError::database("Database health check returned an unexpected value"));
            }

            let pending = pending_migrations(db.pool()).await?;
            if pending.is_empty() {
                output::print_success("Database is reachable and up to date.");
            } else {
                output::print_kv("Pending migrations", &pending.len().to_string());
                for migration in &pending {
                    output::print_kv(&migration.version.to_string(), &migration.description);
                }
            }
        }
    }

    Ok(())
}
