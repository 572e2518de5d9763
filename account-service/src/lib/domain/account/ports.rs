use std::collections::BTreeSet;

use async_trait::async_trait;
use auth::IssuedToken;

use crate::account::errors::AccountError;
use crate::account::models::CredentialRecord;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::Role;
use crate::account::models::RoleId;
use crate::account::models::UpdateAccountCommand;
use crate::account::models::UserCapabilities;
use crate::account::models::UserId;
use crate::account::models::Username;

/// Port for account management operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new active account.
    ///
    /// # Arguments
    /// * `command` - Username, names, plaintext password and initial role ids
    ///
    /// # Returns
    /// Registered account with its roles populated
    ///
    /// # Errors
    /// * `PasswordPolicy` - Password violates the composition policy
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `StorageUnavailable` - Credential store failed
    async fn register(&self, command: RegisterAccountCommand)
        -> Result<CredentialRecord, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StorageUnavailable` - Credential store failed
    async fn get_account(&self, id: &UserId) -> Result<CredentialRecord, AccountError>;

    /// Update profile fields of an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `StorageUnavailable` - Credential store failed
    async fn update_account(
        &self,
        id: &UserId,
        command: UpdateAccountCommand,
    ) -> Result<CredentialRecord, AccountError>;

    /// Bring an account's role assignment in line with `role_ids`.
    ///
    /// # Returns
    /// Account as re-read after the change
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StorageUnavailable` - Credential store failed
    async fn update_roles(
        &self,
        id: &UserId,
        role_ids: BTreeSet<RoleId>,
    ) -> Result<CredentialRecord, AccountError>;

    /// Replace an account's password with a freshly salted hash.
    ///
    /// # Errors
    /// * `PasswordPolicy` - Password violates the composition policy
    /// * `NotFound` - Account does not exist
    /// * `StorageUnavailable` - Credential store failed
    async fn change_password(
        &self,
        id: &UserId,
        password: &str,
    ) -> Result<CredentialRecord, AccountError>;

    /// Deactivate an account. The record is kept.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StorageUnavailable` - Credential store failed
    async fn deactivate(&self, id: &UserId) -> Result<(), AccountError>;

    /// Derive what an account may do from its roles.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StorageUnavailable` - Credential store failed
    async fn get_capabilities(&self, id: &UserId) -> Result<UserCapabilities, AccountError>;
}

/// Port for credential authentication.
#[async_trait]
pub trait AuthenticationPort: Send + Sync + 'static {
    /// Exchange a username and password for an access token.
    ///
    /// # Returns
    /// `Some(token)` on success. `None` when the account is unknown, inactive,
    /// or the password does not match; these cases are indistinguishable.
    ///
    /// # Errors
    /// * `Password` - Stored digest or salt is malformed
    /// * `Token` - Token generation failed
    /// * `StorageUnavailable` - Credential store failed
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<IssuedToken>, AccountError>;
}

/// Persistence operations for credential records.
///
/// Lookups return records with their roles populated.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a credential record by username (exact, case-sensitive match).
    ///
    /// # Errors
    /// * `StorageUnavailable` - Store operation failed
    async fn find_credential_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<CredentialRecord>, AccountError>;

    /// Retrieve a credential record by identifier.
    ///
    /// # Errors
    /// * `StorageUnavailable` - Store operation failed
    async fn find_credential_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<CredentialRecord>, AccountError>;

    /// Insert a new record together with its initial role assignments as a
    /// single write. Either both are stored or neither is.
    ///
    /// # Returns
    /// Created record with its roles populated
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Another record holds the username
    /// * `StorageUnavailable` - Store operation failed
    async fn create_credential(
        &self,
        record: CredentialRecord,
        role_ids: &[RoleId],
    ) -> Result<CredentialRecord, AccountError>;

    /// Update an existing record's scalar fields. Role assignments are left
    /// untouched; they change only through the assignment methods.
    ///
    /// # Errors
    /// * `NotFound` - No record has this identifier
    /// * `UsernameAlreadyExists` - Another record holds the username
    /// * `StorageUnavailable` - Store operation failed
    async fn save_credential(
        &self,
        record: CredentialRecord,
    ) -> Result<CredentialRecord, AccountError>;

    /// Assign roles to an account.
    ///
    /// # Errors
    /// * `StorageUnavailable` - Store operation failed
    async fn add_role_assignments(
        &self,
        id: &UserId,
        role_ids: &[RoleId],
    ) -> Result<(), AccountError>;

    /// Remove role assignments from an account.
    ///
    /// # Errors
    /// * `StorageUnavailable` - Store operation failed
    async fn remove_role_assignments(
        &self,
        id: &UserId,
        role_ids: &[RoleId],
    ) -> Result<(), AccountError>;

    /// Clear the active flag of an account.
    ///
    /// # Returns
    /// False if no record has this identifier
    ///
    /// # Errors
    /// * `StorageUnavailable` - Store operation failed
    async fn deactivate_credential(&self, id: &UserId) -> Result<bool, AccountError>;
}

/// Persistence operations for the role catalogue.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    /// Number of roles currently stored.
    async fn count_roles(&self) -> Result<usize, AccountError>;

    /// Insert roles with their fixed identifiers.
    async fn insert_roles(&self, roles: &[Role]) -> Result<(), AccountError>;
}
