use crate::jwt::AccessClaims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHash;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    pub fn new(token_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(token_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password is blank or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        self.password_hasher.create_hash(password)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored` - Stored digest and salt
    /// * `claims` - Claims to sign into the token
    ///
    /// # Returns
    /// Issued access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password is blank or the stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored: &PasswordHash,
        claims: &AccessClaims,
    ) -> Result<IssuedToken, AuthenticationError> {
        let is_valid = self
            .password_hasher
            .validate_hash(password, &stored.digest, &stored.salt)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.sign(claims)?)
    }

    /// Validate a token and decode its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.token_issuer.verify(token)
    }
}
