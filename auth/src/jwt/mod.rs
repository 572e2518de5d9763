pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;

pub use claims::AccessClaims;
pub use claims::ACCESS_TOKEN_LIFETIME_MINUTES;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
