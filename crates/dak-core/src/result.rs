//! Convenience result type alias for the DAK system.

use crate::error::AppError;

/// A specialized `Result` type for DAK operations.
pub type AppResult<T> = Result<T, AppError>;
