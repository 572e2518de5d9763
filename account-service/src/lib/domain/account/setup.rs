use std::collections::BTreeSet;
use std::sync::Arc;

use auth::PasswordPolicy;

use crate::account::deadline::StoreDeadline;
use crate::account::errors::AccountError;
use crate::account::models::BuiltInRole;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::Role;
use crate::account::models::UserId;
use crate::account::models::Username;
use crate::account::models::BUILT_IN_ROLES;
use crate::account::ports::AccountServicePort;
use crate::account::ports::RoleStore;
use crate::config::BootstrapConfig;

/// Result of an initial setup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Roles were already present; nothing was written.
    AlreadyInitialized,
    /// Roles were seeded and the administrator account registered.
    Initialized { admin_id: UserId },
}

/// Seeds an empty deployment with the built-in roles and an administrator.
pub struct InitialSetup<RS, AS>
where
    RS: RoleStore,
    AS: AccountServicePort,
{
    roles: Arc<RS>,
    accounts: Arc<AS>,
    deadline: StoreDeadline,
}

impl<RS, AS> InitialSetup<RS, AS>
where
    RS: RoleStore,
    AS: AccountServicePort,
{
    pub fn new(roles: Arc<RS>, accounts: Arc<AS>) -> Self {
        Self {
            roles,
            accounts,
            deadline: StoreDeadline::none(),
        }
    }

    pub fn with_deadline(mut self, deadline: StoreDeadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Run the setup once. Any stored role marks the deployment as set up.
    ///
    /// # Arguments
    /// * `bootstrap` - Administrator account to register
    ///
    /// # Errors
    /// * `InvalidUsername` - Configured administrator username is invalid
    /// * `PasswordPolicy` - Configured administrator password violates the policy
    /// * `StorageUnavailable` - Role or credential store failed
    pub async fn run(&self, bootstrap: &BootstrapConfig) -> Result<SetupOutcome, AccountError> {
        let existing = self
            .deadline
            .run("count_roles", self.roles.count_roles())
            .await?;

        if existing > 0 {
            if existing != BUILT_IN_ROLES.len() {
                tracing::warn!(
                    stored = existing,
                    built_in = BUILT_IN_ROLES.len(),
                    "Stored role count differs from built-in roles"
                );
            }
            return Ok(SetupOutcome::AlreadyInitialized);
        }

        // Validate before writing anything so a bad bootstrap leaves the store empty.
        let username = Username::new(bootstrap.admin_username.clone())?;

        let policy = PasswordPolicy::new().validate(&bootstrap.admin_password);
        if !policy.is_valid() {
            return Err(AccountError::PasswordPolicy(policy));
        }

        let roles: Vec<Role> = BUILT_IN_ROLES.iter().copied().map(Role::from).collect();
        self.deadline
            .run("insert_roles", self.roles.insert_roles(&roles))
            .await?;

        let admin = self
            .accounts
            .register(RegisterAccountCommand::new(
                username,
                bootstrap.admin_first_name.clone(),
                bootstrap.admin_last_name.clone(),
                bootstrap.admin_password.clone(),
                BTreeSet::from([BuiltInRole::Administrator.id()]),
            ))
            .await?;

        tracing::info!(
            roles = roles.len(),
            admin_id = %admin.id,
            "Initial setup completed"
        );

        Ok(SetupOutcome::Initialized { admin_id: admin.id })
    }
}
