use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::IssuedToken;

use crate::account::deadline::StoreDeadline;
use crate::account::errors::AccountError;
use crate::account::models::Username;
use crate::account::ports::AuthenticationPort;
use crate::account::ports::CredentialStore;
use crate::domain::clock::Clock;

/// Exchanges credentials for access tokens.
///
/// Unknown usernames, inactive accounts and wrong passwords all end in
/// `Ok(None)` and are logged as the same event.
pub struct AuthenticationService<CS, C>
where
    CS: CredentialStore,
    C: Clock,
{
    store: Arc<CS>,
    authenticator: Authenticator,
    clock: C,
    deadline: StoreDeadline,
}

impl<CS, C> AuthenticationService<CS, C>
where
    CS: CredentialStore,
    C: Clock,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `token_secret` - Secret used to sign access tokens
    /// * `clock` - Time source for token issuance
    pub fn new(store: Arc<CS>, token_secret: &[u8], clock: C) -> Self {
        Self {
            store,
            authenticator: Authenticator::new(token_secret),
            clock,
            deadline: StoreDeadline::none(),
        }
    }

    pub fn with_deadline(mut self, deadline: StoreDeadline) -> Self {
        self.deadline = deadline;
        self
    }

    fn rejected() -> Result<Option<IssuedToken>, AccountError> {
        tracing::info!("Authentication rejected");
        Ok(None)
    }
}

#[async_trait]
impl<CS, C> AuthenticationPort for AuthenticationService<CS, C>
where
    CS: CredentialStore,
    C: Clock,
{
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<IssuedToken>, AccountError> {
        // A string that could never have been registered cannot match a record.
        let Ok(username) = Username::new(username.to_string()) else {
            return Self::rejected();
        };

        let record = self
            .deadline
            .run(
                "find_credential_by_username",
                self.store.find_credential_by_username(&username),
            )
            .await?;

        let Some(record) = record.filter(|record| record.is_active) else {
            return Self::rejected();
        };

        if password.trim().is_empty() {
            return Self::rejected();
        }

        let claims = AccessClaims::for_subject(record.id, record.role_names(), self.clock.now());

        match self
            .authenticator
            .authenticate(password, &record.password, &claims)
        {
            Ok(token) => {
                tracing::info!(user_id = %record.id, "Authentication succeeded");
                Ok(Some(token))
            }
            Err(AuthenticationError::InvalidCredentials) => Self::rejected(),
            Err(AuthenticationError::PasswordError(e)) => {
                tracing::error!(
                    user_id = %record.id,
                    error = %e,
                    "Stored credential is malformed"
                );
                Err(e.into())
            }
            Err(AuthenticationError::JwtError(e)) => {
                tracing::error!(user_id = %record.id, error = %e, "Token issuance failed");
                Err(e.into())
            }
        }
    }
}
