//! Actor-related value objects.

pub mod report;

pub use report::RemovalReport;
