use hmac::Hmac;
use hmac::Mac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha512;

use super::errors::PasswordError;

type HmacSha512 = Hmac<Sha512>;

/// Length in bytes of a stored password digest (HMAC-SHA-512 output).
pub const DIGEST_LENGTH: usize = 64;

/// Length in bytes of a stored password salt (HMAC-SHA-512 key block).
pub const SALT_LENGTH: usize = 128;

/// Digest and salt pair produced for a single password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    /// Keyed hash of the password, always `DIGEST_LENGTH` bytes
    pub digest: Vec<u8>,
    /// Random key the digest was computed with, always `SALT_LENGTH` bytes
    pub salt: Vec<u8>,
}

// Keep key material out of logs.
impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHash")
            .field("digest", &format_args!("[{} bytes]", self.digest.len()))
            .field("salt", &format_args!("[{} bytes]", self.salt.len()))
            .finish()
    }
}

/// Password hashing implementation.
///
/// Derives a salted keyed hash (HMAC-SHA-512) for a password, where the salt
/// is a fresh random 128-byte key per credential.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Digest (64 bytes) and salt (128 bytes) for storage
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty or whitespace only
    /// * `HashingFailed` - The OS random source could not produce a salt
    pub fn create_hash(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        ensure_not_blank(password)?;

        let mut salt = vec![0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let digest = keyed_hash(password, &salt)?
            .finalize()
            .into_bytes()
            .to_vec();

        Ok(PasswordHash { digest, salt })
    }

    /// Verify a password against a stored digest and salt.
    ///
    /// The recomputed digest is compared in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `digest` - Stored digest
    /// * `salt` - Stored salt the digest was computed with
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty or whitespace only
    /// * `InvalidDigestLength` - Stored digest is not 64 bytes
    /// * `InvalidSaltLength` - Stored salt is not 128 bytes
    pub fn validate_hash(
        &self,
        password: &str,
        digest: &[u8],
        salt: &[u8],
    ) -> Result<bool, PasswordError> {
        ensure_not_blank(password)?;

        if digest.len() != DIGEST_LENGTH {
            return Err(PasswordError::InvalidDigestLength {
                expected: DIGEST_LENGTH,
                actual: digest.len(),
            });
        }

        if salt.len() != SALT_LENGTH {
            return Err(PasswordError::InvalidSaltLength {
                expected: SALT_LENGTH,
                actual: salt.len(),
            });
        }

        Ok(keyed_hash(password, salt)?.verify_slice(digest).is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_not_blank(password: &str) -> Result<(), PasswordError> {
    if password.trim().is_empty() {
        Err(PasswordError::EmptyPassword)
    } else {
        Ok(())
    }
}

fn keyed_hash(password: &str, salt: &[u8]) -> Result<HmacSha512, PasswordError> {
    let mut mac = HmacSha512::new_from_slice(salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    mac.update(password.as_bytes());
    Ok(mac)
}
