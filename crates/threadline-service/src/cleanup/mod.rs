//! Cleanup of records that depend on a removed actor.

pub mod cascade;

pub use cascade::CascadeCleaner;
