//! Edit history entities.

pub mod model;

pub use model::EditRecord;
