use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Fixed lifetime of an access token.
pub const ACCESS_TOKEN_LIFETIME_MINUTES: i64 = 30;

/// Claims carried by an access token.
///
/// Identity is the `sub` claim; authorization is one `role` entry per role
/// name the subject held when the token was issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (account identifier)
    pub sub: String,

    /// Role names, in assignment order (duplicates preserved)
    #[serde(default)]
    pub role: Vec<String>,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a subject issued at `now`, expiring after the fixed
    /// token lifetime.
    ///
    /// # Arguments
    /// * `subject` - Account identifier (stringified into `sub`)
    /// * `role_names` - Role names to embed, one claim per entry
    /// * `now` - Issuance instant
    ///
    /// # Returns
    /// Claims with sub, role, nbf, iat and exp set
    pub fn for_subject<I, S>(subject: impl ToString, role_names: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let issued_at = now.timestamp();
        let expiration = now + Self::lifetime();

        Self {
            sub: subject.to_string(),
            role: role_names.into_iter().map(Into::into).collect(),
            nbf: issued_at,
            iat: issued_at,
            exp: expiration.timestamp(),
        }
    }

    /// Lifetime applied to every issued token.
    pub fn lifetime() -> Duration {
        Duration::minutes(ACCESS_TOKEN_LIFETIME_MINUTES)
    }

    pub fn roles(&self) -> &[String] {
        &self.role
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.role.iter().any(|r| r == name)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
