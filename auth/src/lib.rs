//! Credential and access-token primitives
//!
//! Provides the security-sensitive building blocks of account authentication:
//! - Password hashing (HMAC-SHA-512 keyed by a random 128-byte salt)
//! - Password composition policy
//! - Role assignment reconciliation
//! - Access token issuance and verification (HS256 JWT)
//! - Authentication coordination
//!
//! Everything here is synchronous and stateless. Persistence and transport are
//! left to the calling service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.create_hash("Admin1!").unwrap();
//! assert_eq!(hash.digest.len(), 64);
//! assert_eq!(hash.salt.len(), 128);
//! assert!(hasher.validate_hash("Admin1!", &hash.digest, &hash.salt).unwrap());
//! ```
//!
//! ## Password Policy
//! ```
//! use auth::{PasswordPolicy, PasswordViolation};
//!
//! let result = PasswordPolicy::new().validate("test");
//! assert!(!result.is_valid());
//! assert_eq!(
//!     result.violations(),
//!     &[PasswordViolation::LetterAndNumber, PasswordViolation::UpperAndLower]
//! );
//! ```
//!
//! ## Role Reconciliation
//! ```
//! use std::collections::BTreeSet;
//!
//! let current: BTreeSet<i32> = [1, 2].into();
//! let desired: BTreeSet<i32> = [2, 3].into();
//!
//! let diff = auth::reconcile(&current, &desired);
//! assert_eq!(diff.to_add, BTreeSet::from([3]));
//! assert_eq!(diff.to_remove, BTreeSet::from([1]));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AccessClaims, Authenticator};
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let stored = auth.hash_password("Admin1!").unwrap();
//!
//! // Login: verify and issue token
//! let claims = AccessClaims::for_subject("user123", ["Administrator"], Utc::now());
//! let token = auth.authenticate("Admin1!", &stored, &claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&token.access_token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod roles;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::AccessClaims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHash;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PasswordValidationResult;
pub use password::PasswordViolation;
pub use roles::reconcile;
pub use roles::RoleDiff;
