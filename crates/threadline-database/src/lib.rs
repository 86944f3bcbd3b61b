//! # threadline-database
//!
//! SQLite connection management, the embedded migration runner, and
//! concrete repository implementations for all Threadline entities.
//!
//! Read methods run against the pool. Write methods take the connection of
//! an open transaction so callers decide what commits together.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::{DatabasePool, DbConnection, DbTransaction, commit_transaction};
