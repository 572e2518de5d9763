use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use account_service::account::authentication::AuthenticationService;
use account_service::account::errors::AccountError;
use account_service::account::models::CredentialRecord;
use account_service::account::models::Role;
use account_service::account::models::RoleId;
use account_service::account::models::UserId;
use account_service::account::models::Username;
use account_service::account::ports::CredentialStore;
use account_service::account::ports::RoleStore;
use account_service::account::service::AccountService;
use account_service::account::setup::InitialSetup;
use account_service::account::setup::SetupOutcome;
use account_service::clock::SystemClock;
use account_service::config::BootstrapConfig;
use account_service::config::Config;
use account_service::config::JwtConfig;
use account_service::config::StoreConfig;
use async_trait::async_trait;
use auth::PasswordHash;
use tokio::sync::RwLock;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Account row as a relational store would keep it: scalar fields plus
/// assignment rows referencing the role catalogue.
#[derive(Clone)]
struct StoredAccount {
    id: UserId,
    username: Username,
    first_name: String,
    last_name: String,
    is_active: bool,
    password: PasswordHash,
    role_ids: Vec<RoleId>,
}

/// In-memory credential and role store
#[derive(Default)]
pub struct InMemoryStore {
    accounts: RwLock<HashMap<UserId, StoredAccount>>,
    roles: RwLock<BTreeMap<RoleId, Role>>,
    unavailable: AtomicBool,
    latency: RwLock<Option<Duration>>,
}

impl InMemoryStore {
    /// Make every following call fail with `StorageUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay every following call.
    pub async fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write().await = latency;
    }

    async fn enter(&self) -> Result<(), AccountError> {
        let latency = *self.latency.read().await;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AccountError::StorageUnavailable(
                "connection refused by 10.0.0.5:5432".to_string(),
            ));
        }
        Ok(())
    }

    async fn hydrate(&self, account: StoredAccount) -> CredentialRecord {
        let catalogue = self.roles.read().await;
        let roles = account
            .role_ids
            .iter()
            .filter_map(|id| catalogue.get(id).cloned())
            .collect();

        CredentialRecord {
            id: account.id,
            username: account.username,
            first_name: account.first_name,
            last_name: account.last_name,
            is_active: account.is_active,
            password: account.password,
            roles,
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn find_credential_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<CredentialRecord>, AccountError> {
        self.enter().await?;

        let found = self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.username == *username)
            .cloned();

        match found {
            Some(account) => Ok(Some(self.hydrate(account).await)),
            None => Ok(None),
        }
    }

    async fn find_credential_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<CredentialRecord>, AccountError> {
        self.enter().await?;

        let found = self.accounts.read().await.get(id).cloned();

        match found {
            Some(account) => Ok(Some(self.hydrate(account).await)),
            None => Ok(None),
        }
    }

    async fn create_credential(
        &self,
        record: CredentialRecord,
        role_ids: &[RoleId],
    ) -> Result<CredentialRecord, AccountError> {
        self.enter().await?;

        let stored = {
            let mut accounts = self.accounts.write().await;

            let taken = accounts
                .values()
                .any(|account| account.username == record.username);
            if taken {
                return Err(AccountError::UsernameAlreadyExists(
                    record.username.to_string(),
                ));
            }

            let mut assigned = Vec::new();
            for role_id in role_ids {
                if !assigned.contains(role_id) {
                    assigned.push(*role_id);
                }
            }

            let stored = StoredAccount {
                id: record.id,
                username: record.username,
                first_name: record.first_name,
                last_name: record.last_name,
                is_active: record.is_active,
                password: record.password,
                role_ids: assigned,
            };
            accounts.insert(stored.id, stored.clone());
            stored
        };

        Ok(self.hydrate(stored).await)
    }

    async fn save_credential(
        &self,
        record: CredentialRecord,
    ) -> Result<CredentialRecord, AccountError> {
        self.enter().await?;

        let stored = {
            let mut accounts = self.accounts.write().await;

            let taken = accounts
                .values()
                .any(|account| account.id != record.id && account.username == record.username);
            if taken {
                return Err(AccountError::UsernameAlreadyExists(
                    record.username.to_string(),
                ));
            }

            let account = accounts
                .get_mut(&record.id)
                .ok_or_else(|| AccountError::NotFound(record.id.to_string()))?;

            account.username = record.username;
            account.first_name = record.first_name;
            account.last_name = record.last_name;
            account.is_active = record.is_active;
            account.password = record.password;
            account.clone()
        };

        Ok(self.hydrate(stored).await)
    }

    async fn add_role_assignments(
        &self,
        id: &UserId,
        role_ids: &[RoleId],
    ) -> Result<(), AccountError> {
        self.enter().await?;

        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        for role_id in role_ids {
            if !account.role_ids.contains(role_id) {
                account.role_ids.push(*role_id);
            }
        }
        Ok(())
    }

    async fn remove_role_assignments(
        &self,
        id: &UserId,
        role_ids: &[RoleId],
    ) -> Result<(), AccountError> {
        self.enter().await?;

        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        account.role_ids.retain(|role_id| !role_ids.contains(role_id));
        Ok(())
    }

    async fn deactivate_credential(&self, id: &UserId) -> Result<bool, AccountError> {
        self.enter().await?;

        match self.accounts.write().await.get_mut(id) {
            Some(account) => {
                account.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl RoleStore for InMemoryStore {
    async fn count_roles(&self) -> Result<usize, AccountError> {
        self.enter().await?;
        Ok(self.roles.read().await.len())
    }

    async fn insert_roles(&self, roles: &[Role]) -> Result<(), AccountError> {
        self.enter().await?;

        let mut catalogue = self.roles.write().await;
        for role in roles {
            catalogue.insert(role.id, role.clone());
        }
        Ok(())
    }
}

/// Services wired over a shared in-memory store, after initial setup
pub struct TestApp {
    pub config: Config,
    pub store: Arc<InMemoryStore>,
    pub accounts: Arc<AccountService<InMemoryStore>>,
    pub authentication: AuthenticationService<InMemoryStore, SystemClock>,
    pub admin_id: UserId,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(StoreConfig { timeout_ms: None }).await
    }

    pub async fn spawn_with(store_config: StoreConfig) -> Self {
        init_tracing();

        let config = Config {
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
            },
            store: store_config,
            bootstrap: BootstrapConfig::default(),
        };
        config.validate().expect("Invalid test configuration");

        let store = Arc::new(InMemoryStore::default());
        let deadline = config.store.deadline();

        let accounts =
            Arc::new(AccountService::new(Arc::clone(&store)).with_deadline(deadline));

        let authentication = AuthenticationService::new(
            Arc::clone(&store),
            config.jwt.secret.as_bytes(),
            SystemClock,
        )
        .with_deadline(deadline);

        let outcome = InitialSetup::new(Arc::clone(&store), Arc::clone(&accounts))
            .with_deadline(deadline)
            .run(&config.bootstrap)
            .await
            .expect("Initial setup failed");

        let SetupOutcome::Initialized { admin_id } = outcome else {
            panic!("Fresh store reported as already initialized");
        };

        Self {
            config,
            store,
            accounts,
            authentication,
            admin_id,
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
