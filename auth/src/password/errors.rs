use thiserror::Error;

/// Error type for password hashing operations.
///
/// Every variant except `HashingFailed` signals malformed input reaching the
/// hasher, which means a defect upstream (a caller skipping policy checks or a
/// corrupted stored credential) rather than a wrong password.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Value cannot be empty or whitespace")]
    EmptyPassword,

    #[error("Expected {expected}-byte password hash, got {actual}")]
    InvalidDigestLength { expected: usize, actual: usize },

    #[error("Expected {expected}-byte password salt, got {actual}")]
    InvalidSaltLength { expected: usize, actual: usize },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

impl PasswordError {
    /// Whether the error was caused by malformed arguments to the hasher.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, PasswordError::HashingFailed(_))
    }
}
