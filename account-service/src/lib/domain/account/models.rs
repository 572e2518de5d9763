use std::collections::BTreeSet;
use std::fmt;

use auth::PasswordHash;
use serde::Serialize;
use uuid::Uuid;

use crate::account::errors::UserIdError;
use crate::account::errors::UsernameError;

/// Credential record aggregate.
///
/// Owned by the credential store; the services only read and write its fields.
/// Accounts are never removed, deactivation clears `is_active`.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub id: UserId,
    pub username: Username,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub password: PasswordHash,
    pub roles: Vec<Role>,
}

impl CredentialRecord {
    /// Identifiers of the roles currently assigned.
    pub fn role_ids(&self) -> BTreeSet<RoleId> {
        self.roles.iter().map(|role| role.id).collect()
    }

    /// Role names in assignment order, as embedded into access tokens.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|role| role.name.clone()).collect()
    }

    pub fn has_any_role(&self, roles: &[BuiltInRole]) -> bool {
        self.roles
            .iter()
            .any(|assigned| roles.iter().any(|role| role.id() == assigned.id))
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Case-sensitive, non-blank, at most 255 characters and without leading or
/// trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty or whitespace only
    /// * `TooLong` - Username longer than 255 characters
    /// * `SurroundingWhitespace` - Username has leading or trailing whitespace
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = username.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if username.trim() != username {
            return Err(UsernameError::SurroundingWhitespace);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stable role identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RoleId(pub i32);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role that can be assigned to an account.
///
/// The name is what access tokens carry as the role claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub description: String,
}

/// Roles every deployment starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInRole {
    Administrator,
    User,
}

/// Seed table inserted by the initial setup.
pub const BUILT_IN_ROLES: [BuiltInRole; 2] = [BuiltInRole::Administrator, BuiltInRole::User];

/// Roles allowed to manage other accounts.
pub const USER_MANAGER_ROLES: [BuiltInRole; 1] = [BuiltInRole::Administrator];

impl BuiltInRole {
    pub const fn id(&self) -> RoleId {
        match self {
            BuiltInRole::Administrator => RoleId(1),
            BuiltInRole::User => RoleId(2),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            BuiltInRole::Administrator => "Administrator",
            BuiltInRole::User => "User",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            BuiltInRole::Administrator => "Administrator",
            BuiltInRole::User => "User",
        }
    }
}

impl From<BuiltInRole> for Role {
    fn from(role: BuiltInRole) -> Self {
        Role {
            id: role.id(),
            name: role.name().to_string(),
            description: role.description().to_string(),
        }
    }
}

/// What the holder of an account is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserCapabilities {
    pub can_manage_users: bool,
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub username: Username,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role_ids: BTreeSet<RoleId>,
}

impl RegisterAccountCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `first_name` - Given name
    /// * `last_name` - Family name
    /// * `password` - Plain text password (checked against policy and hashed by service)
    /// * `role_ids` - Roles to assign on creation
    pub fn new(
        username: Username,
        first_name: String,
        last_name: String,
        password: String,
        role_ids: BTreeSet<RoleId>,
    ) -> Self {
        Self {
            username,
            first_name,
            last_name,
            password,
            role_ids,
        }
    }
}

/// Command to update an existing account's profile.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateAccountCommand {
    pub username: Option<Username>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
