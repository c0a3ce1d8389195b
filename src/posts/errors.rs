//! Post repository error types.

use thiserror::Error;

/// Post repository errors
#[derive(Debug, Error)]
pub enum PostError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Author does not resolve to an account
    #[error("Unknown author: {0}")]
    UnknownAuthor(i64),
}

/// Result type for post operations
pub type PostResult<T> = Result<T, PostError>;
