use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::PasswordPolicy;

use crate::account::deadline::StoreDeadline;
use crate::account::errors::AccountError;
use crate::account::models::CredentialRecord;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::RoleId;
use crate::account::models::UpdateAccountCommand;
use crate::account::models::UserCapabilities;
use crate::account::models::UserId;
use crate::account::models::USER_MANAGER_ROLES;
use crate::account::ports::AccountServicePort;
use crate::account::ports::CredentialStore;

/// Domain service implementation for account management.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    password_hasher: PasswordHasher,
    password_policy: PasswordPolicy,
    deadline: StoreDeadline,
}

impl<CS> AccountService<CS>
where
    CS: CredentialStore,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    pub fn new(store: Arc<CS>) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            password_policy: PasswordPolicy::new(),
            deadline: StoreDeadline::none(),
        }
    }

    /// Bound every store call made by this service.
    pub fn with_deadline(mut self, deadline: StoreDeadline) -> Self {
        self.deadline = deadline;
        self
    }

    async fn load(&self, id: &UserId) -> Result<CredentialRecord, AccountError> {
        self.deadline
            .run("find_credential_by_id", self.store.find_credential_by_id(id))
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    async fn save(&self, record: CredentialRecord) -> Result<CredentialRecord, AccountError> {
        self.deadline
            .run("save_credential", self.store.save_credential(record))
            .await
    }

    fn check_policy(&self, password: &str) -> Result<(), AccountError> {
        let result = self.password_policy.validate(password);
        if result.is_valid() {
            Ok(())
        } else {
            Err(AccountError::PasswordPolicy(result))
        }
    }

    async fn add_roles(&self, id: &UserId, role_ids: &BTreeSet<RoleId>) -> Result<(), AccountError> {
        if role_ids.is_empty() {
            return Ok(());
        }

        let role_ids: Vec<RoleId> = role_ids.iter().copied().collect();
        self.deadline
            .run(
                "add_role_assignments",
                self.store.add_role_assignments(id, &role_ids),
            )
            .await
    }

    async fn remove_roles(
        &self,
        id: &UserId,
        role_ids: &BTreeSet<RoleId>,
    ) -> Result<(), AccountError> {
        if role_ids.is_empty() {
            return Ok(());
        }

        let role_ids: Vec<RoleId> = role_ids.iter().copied().collect();
        self.deadline
            .run(
                "remove_role_assignments",
                self.store.remove_role_assignments(id, &role_ids),
            )
            .await
    }
}

#[async_trait]
impl<CS> AccountServicePort for AccountService<CS>
where
    CS: CredentialStore,
{
    async fn register(
        &self,
        command: RegisterAccountCommand,
    ) -> Result<CredentialRecord, AccountError> {
        self.check_policy(&command.password)?;

        let existing = self
            .deadline
            .run(
                "find_credential_by_username",
                self.store.find_credential_by_username(&command.username),
            )
            .await?;
        if existing.is_some() {
            return Err(AccountError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password = self.password_hasher.create_hash(&command.password)?;

        let record = CredentialRecord {
            id: UserId::new(),
            username: command.username,
            first_name: command.first_name,
            last_name: command.last_name,
            is_active: true,
            password,
            roles: Vec::new(),
        };

        let role_ids: Vec<RoleId> = command.role_ids.into_iter().collect();
        let created = self
            .deadline
            .run(
                "create_credential",
                self.store.create_credential(record, &role_ids),
            )
            .await?;

        tracing::info!(
            user_id = %created.id,
            roles = role_ids.len(),
            "Account registered"
        );

        Ok(created)
    }

    async fn get_account(&self, id: &UserId) -> Result<CredentialRecord, AccountError> {
        self.load(id).await
    }

    async fn update_account(
        &self,
        id: &UserId,
        command: UpdateAccountCommand,
    ) -> Result<CredentialRecord, AccountError> {
        let mut record = self.load(id).await?;

        if let Some(new_username) = command.username {
            if new_username != record.username {
                let holder = self
                    .deadline
                    .run(
                        "find_credential_by_username",
                        self.store.find_credential_by_username(&new_username),
                    )
                    .await?;
                if holder.is_some_and(|other| other.id != record.id) {
                    return Err(AccountError::UsernameAlreadyExists(
                        new_username.to_string(),
                    ));
                }
                record.username = new_username;
            }
        }

        if let Some(first_name) = command.first_name {
            record.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            record.last_name = last_name;
        }

        let updated = self.save(record).await?;
        tracing::info!(user_id = %updated.id, "Account updated");

        Ok(updated)
    }

    async fn update_roles(
        &self,
        id: &UserId,
        role_ids: BTreeSet<RoleId>,
    ) -> Result<CredentialRecord, AccountError> {
        let record = self.load(id).await?;
        let diff = auth::reconcile(&record.role_ids(), &role_ids);

        if diff.is_empty() {
            return Ok(record);
        }

        self.add_roles(id, &diff.to_add).await?;
        self.remove_roles(id, &diff.to_remove).await?;

        tracing::info!(
            user_id = %id,
            added = diff.to_add.len(),
            removed = diff.to_remove.len(),
            "Account roles reconciled"
        );

        self.load(id).await
    }

    async fn change_password(
        &self,
        id: &UserId,
        password: &str,
    ) -> Result<CredentialRecord, AccountError> {
        self.check_policy(password)?;

        let mut record = self.load(id).await?;
        record.password = self.password_hasher.create_hash(password)?;

        let updated = self.save(record).await?;
        tracing::info!(user_id = %updated.id, "Account password changed");

        Ok(updated)
    }

    async fn deactivate(&self, id: &UserId) -> Result<(), AccountError> {
        let deactivated = self
            .deadline
            .run("deactivate_credential", self.store.deactivate_credential(id))
            .await?;

        if !deactivated {
            return Err(AccountError::NotFound(id.to_string()));
        }

        tracing::info!(user_id = %id, "Account deactivated");
        Ok(())
    }

    async fn get_capabilities(&self, id: &UserId) -> Result<UserCapabilities, AccountError> {
        let record = self.load(id).await?;

        Ok(UserCapabilities {
            can_manage_users: record.has_any_role(&USER_MANAGER_ROLES),
        })
    }
}
