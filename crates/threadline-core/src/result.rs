//! Convenience result type alias for Threadline.

use crate::error::AppError;

/// A specialized `Result` type for Threadline operations.
pub type AppResult<T> = Result<T, AppError>;
