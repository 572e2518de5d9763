use auth::JwtError;
use auth::PasswordError;
use auth::PasswordValidationResult;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username cannot be empty or whitespace")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Username cannot start or end with whitespace")]
    SurroundingWhitespace,
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Malformed input reached the password hasher (blank password or a
    /// stored digest/salt of the wrong length).
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Password does not satisfy policy: {0}")]
    PasswordPolicy(PasswordValidationResult),

    // Domain-level errors
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    // Infrastructure errors. The detail is kept for logs and never rendered.
    #[error("Credential store unavailable")]
    StorageUnavailable(String),
}

impl AccountError {
    /// Policy violations carried by this error, if it is a policy rejection.
    pub fn policy_violations(&self) -> Option<&PasswordValidationResult> {
        match self {
            AccountError::PasswordPolicy(result) => Some(result),
            _ => None,
        }
    }
}
