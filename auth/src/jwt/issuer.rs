use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use super::claims::AccessClaims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// A signed access token together with its validity window.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWT to hand to the caller as a bearer credential
    pub access_token: String,
    /// Issued at (Unix timestamp)
    pub issued_at: i64,
    /// Expiration time (Unix timestamp)
    pub expires_at: i64,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("access_token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Issues and verifies access tokens signed with a shared secret.
pub struct TokenIssuer {
    handler: JwtHandler,
}

impl TokenIssuer {
    /// Create an issuer signing with the raw bytes of `secret`.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            handler: JwtHandler::new(secret),
        }
    }

    /// Issue a token for a subject and its role names.
    ///
    /// # Arguments
    /// * `subject` - Account identifier
    /// * `role_names` - One role claim is emitted per entry
    /// * `now` - Issuance instant; the token expires 30 minutes later
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue<I, S>(
        &self,
        subject: impl ToString,
        role_names: I,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sign(&AccessClaims::for_subject(subject, role_names, now))
    }

    /// Sign prepared claims.
    pub fn sign(&self, claims: &AccessClaims) -> Result<IssuedToken, JwtError> {
        let access_token = self.handler.encode(claims)?;

        Ok(IssuedToken {
            access_token,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    /// Verify a token's signature and validity window and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidToken` - Signature mismatch or token not yet valid
    /// * `DecodingFailed` - Token is malformed
    pub fn verify(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.handler.decode(token)
    }
}
