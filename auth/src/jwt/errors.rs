use thiserror::Error;

/// Failures while signing or verifying an access token.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    /// Claims could not be serialized or signed.
    #[error("Failed to sign access token: {0}")]
    EncodingFailed(String),

    /// Not a compact JWT, or the payload is not a set of access claims.
    #[error("Malformed access token: {0}")]
    DecodingFailed(String),

    #[error("Access token has expired")]
    TokenExpired,

    /// Signature mismatch, or `nbf` lies in the future.
    #[error("Access token rejected: {0}")]
    InvalidToken(String),
}

impl JwtError {
    /// True when the token itself was at fault rather than the signer.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, JwtError::EncodingFailed(_))
    }
}
