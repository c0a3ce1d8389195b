//! Authentication error types.

use thiserror::Error;

/// Authentication errors
///
/// Malformed hashes and tokens are expected adversarial input, so the hasher
/// and token codec never surface parse details: they collapse to a boolean or
/// to [`AuthError::InvalidOrExpiredToken`]. Nothing here is fatal to the
/// process; every failure is per-request and recoverable by the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Token signing failed
    #[error("Token signing failed")]
    SigningFailed,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Username or email already in use
    #[error("Username or email already in use")]
    AccountConflict,

    /// Malformed, tampered, or expired token; deliberately indistinguishable
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    /// Caller is not authenticated as the account being mutated
    #[error("Unauthorized")]
    Unauthorized,

    /// Account not found
    #[error("Account not found")]
    NotFound,
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database and signing errors are sanitized to prevent disclosure of
    /// internal structure; the remaining variants are written for end users.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) => "Internal server error".to_string(),
            AuthError::HashingFailed | AuthError::SigningFailed => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
