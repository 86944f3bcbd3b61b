//! # threadline-service
//!
//! Message lifecycle services for Threadline. [`MessageService`] is the
//! single entry point for mutations and orchestrates the side-effect
//! components around explicit store transactions:
//!
//! - create: message row + [`NotificationDispatcher`], one transaction
//! - edit: [`EditHistoryRecorder`] + content update, one transaction
//! - actor removal: [`CascadeCleaner`], one transaction
//!
//! [`ThreadBuilder`] and [`UnreadView`] are read-only projections.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod cleanup;
pub mod message;
pub mod notification;

pub use cleanup::CascadeCleaner;
pub use message::{ContentPolicy, EditHistoryRecorder, MessageService, ThreadBuilder, UnreadView};
pub use notification::{NotificationDispatcher, NotificationService};
