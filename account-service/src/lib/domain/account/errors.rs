use thiserror::Error;

/// Error for UserStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown user status: {0}")]
pub struct UserStatusError(pub String);

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Domain-level errors
    #[error("user with id '{0}' already exists")]
    Conflict(String),

    #[error("user with email '{0}' already exists")]
    EmailAlreadyExists(String),

    /// Unknown email and wrong password both map here.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Invalid user status: {0}")]
    InvalidStatus(#[from] UserStatusError),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    TokenSigning(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
