//! Actor lifecycle CLI commands.

use clap::{Args, Subcommand};
use uuid::Uuid;

use super::AppContext;
use crate::output::{self, OutputFormat};
use threadline_core::error::AppError;

/// Arguments for actor commands
#[derive(Debug, Args)]
pub struct ActorArgs {
    /// Actor subcommand
    #[command(subcommand)]
    pub command: ActorCommand,
}

/// Actor subcommands
#[derive(Debug, Subcommand)]
pub enum ActorCommand {
    /// Delete every message, reply, notification and edit record tied to an actor
    Remove {
        /// Actor ID
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Execute actor commands
pub async fn execute(
    args: &ActorArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ActorCommand::Remove { id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "This will permanently delete all messages involving {id}. Continue?"
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let report = ctx.messages.remove_actor(*id).await?;

            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&report)?;
                    println!("{json}");
                }
                OutputFormat::Table => {
                    output::print_success(&format!("Actor {id} removed"));
                    output::print_kv("Messages", &report.messages_removed.to_string());
                    output::print_kv("Notifications", &report.notifications_removed.to_string());
                    output::print_kv("Edit records", &report.edit_records_removed.to_string());
                }
            }
        }
    }

    Ok(())
}
