//! Convenience result type alias for IpGate.

use crate::error::AppError;

/// A specialized `Result` type for IpGate operations.
pub type AppResult<T> = Result<T, AppError>;
