//! # threadline-entity
//!
//! Domain entity models for Threadline. Every struct in this crate
//! represents a database table row, a read projection, or a domain value
//! object. Row types additionally derive `sqlx::FromRow`.

pub mod actor;
pub mod history;
pub mod message;
pub mod notification;
