pub mod errors;
pub mod hasher;
pub mod policy;

pub use errors::PasswordError;
pub use hasher::PasswordHash;
pub use hasher::PasswordHasher;
pub use hasher::DIGEST_LENGTH;
pub use hasher::SALT_LENGTH;
pub use policy::PasswordPolicy;
pub use policy::PasswordValidationResult;
pub use policy::PasswordViolation;
