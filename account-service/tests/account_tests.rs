mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use account_service::account::errors::AccountError;
use account_service::account::models::BuiltInRole;
use account_service::account::models::RegisterAccountCommand;
use account_service::account::models::RoleId;
use account_service::account::models::UpdateAccountCommand;
use account_service::account::models::UserId;
use account_service::account::models::Username;
use account_service::account::ports::AccountServicePort;
use account_service::account::ports::RoleStore;
use account_service::account::service::AccountService;
use account_service::account::setup::InitialSetup;
use account_service::account::setup::SetupOutcome;
use account_service::config::BootstrapConfig;
use auth::PasswordViolation;
use common::InMemoryStore;
use common::TestApp;

fn register_command(username: &str, password: &str, role_ids: &[RoleId]) -> RegisterAccountCommand {
    RegisterAccountCommand::new(
        Username::new(username.to_string()).unwrap(),
        "Jane".to_string(),
        "Doe".to_string(),
        password.to_string(),
        role_ids.iter().copied().collect(),
    )
}

#[tokio::test]
async fn test_initial_setup_seeds_once() {
    let app = TestApp::spawn().await;

    assert_eq!(app.store.count_roles().await.unwrap(), 2);

    let admin = app.accounts.get_account(&app.admin_id).await.unwrap();
    assert_eq!(admin.username.as_str(), "admin");
    assert_eq!(admin.first_name, "Default");
    assert_eq!(admin.last_name, "Administrator");
    assert!(admin.is_active);
    assert_eq!(admin.role_names(), vec!["Administrator"]);

    let outcome = InitialSetup::new(Arc::clone(&app.store), Arc::clone(&app.accounts))
        .run(&app.config.bootstrap)
        .await
        .unwrap();
    assert_eq!(outcome, SetupOutcome::AlreadyInitialized);
}

#[tokio::test]
async fn test_register_and_fetch() {
    let app = TestApp::spawn().await;

    let created = app
        .accounts
        .register(register_command("jane", "Secret1", &[BuiltInRole::User.id()]))
        .await
        .unwrap();

    let fetched = app.accounts.get_account(&created.id).await.unwrap();
    assert_eq!(fetched.username.as_str(), "jane");
    assert_eq!(fetched.role_ids(), BTreeSet::from([RoleId(2)]));
    assert_eq!(fetched.password.digest.len(), 64);
    assert_eq!(fetched.password.salt.len(), 128);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    let result = app
        .accounts
        .register(register_command("admin", "Secret1", &[]))
        .await;

    assert!(matches!(
        result.unwrap_err(),
        AccountError::UsernameAlreadyExists(_)
    ));
}

#[tokio::test]
async fn test_register_weak_password_lists_violations() {
    let app = TestApp::spawn().await;

    let error = app
        .accounts
        .register(register_command("jane", "test", &[]))
        .await
        .unwrap_err();

    let result = error.policy_violations().expect("Expected policy violations");
    assert_eq!(
        result.violations(),
        &[
            PasswordViolation::LetterAndNumber,
            PasswordViolation::UpperAndLower
        ]
    );

    let body = serde_json::to_value(result).unwrap();
    assert_eq!(
        body["violations"],
        serde_json::json!(["letter_and_number", "upper_and_lower"])
    );
}

#[tokio::test]
async fn test_update_roles_reconciles() {
    let app = TestApp::spawn().await;

    let updated = app
        .accounts
        .update_roles(&app.admin_id, BTreeSet::from([RoleId(2)]))
        .await
        .unwrap();
    assert_eq!(updated.role_names(), vec!["User"]);

    let capabilities = app.accounts.get_capabilities(&app.admin_id).await.unwrap();
    assert!(!capabilities.can_manage_users);

    let cleared = app
        .accounts
        .update_roles(&app.admin_id, BTreeSet::new())
        .await
        .unwrap();
    assert!(cleared.roles.is_empty());
}

#[tokio::test]
async fn test_update_account_profile() {
    let app = TestApp::spawn().await;

    let updated = app
        .accounts
        .update_account(
            &app.admin_id,
            UpdateAccountCommand {
                username: Some(Username::new("root".to_string()).unwrap()),
                first_name: Some("Site".to_string()),
                last_name: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.username.as_str(), "root");
    assert_eq!(updated.first_name, "Site");
    assert_eq!(updated.last_name, "Administrator");
    assert_eq!(updated.role_names(), vec!["Administrator"]);
}

#[tokio::test]
async fn test_capabilities() {
    let app = TestApp::spawn().await;

    let admin = app.accounts.get_capabilities(&app.admin_id).await.unwrap();
    assert!(admin.can_manage_users);

    let user = app
        .accounts
        .register(register_command("jane", "Secret1", &[BuiltInRole::User.id()]))
        .await
        .unwrap();
    let capabilities = app.accounts.get_capabilities(&user.id).await.unwrap();
    assert!(!capabilities.can_manage_users);
}

#[tokio::test]
async fn test_unknown_account_not_found() {
    let app = TestApp::spawn().await;
    let missing = UserId::new();

    assert!(matches!(
        app.accounts.get_account(&missing).await.unwrap_err(),
        AccountError::NotFound(_)
    ));
    assert!(matches!(
        app.accounts.deactivate(&missing).await.unwrap_err(),
        AccountError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_weak_bootstrap_password_leaves_store_empty() {
    common::init_tracing();

    let store = Arc::new(InMemoryStore::default());
    let accounts = Arc::new(AccountService::new(Arc::clone(&store)));
    let setup = InitialSetup::new(Arc::clone(&store), Arc::clone(&accounts));

    let weak = BootstrapConfig {
        admin_password: "weak".to_string(),
        ..Default::default()
    };
    let error = setup.run(&weak).await.unwrap_err();
    assert!(error.policy_violations().is_some());
    assert_eq!(store.count_roles().await.unwrap(), 0);

    let outcome = setup.run(&BootstrapConfig::default()).await.unwrap();
    let SetupOutcome::Initialized { admin_id } = outcome else {
        panic!("Setup did not run after a rejected bootstrap");
    };

    let admin = accounts.get_account(&admin_id).await.unwrap();
    assert_eq!(admin.role_names(), vec!["Administrator"]);
}

#[tokio::test]
async fn test_register_can_be_retried_after_store_failure() {
    let app = TestApp::spawn().await;

    app.store.set_unavailable(true);
    let failed = app
        .accounts
        .register(register_command("jane", "Secret1", &[BuiltInRole::User.id()]))
        .await;
    assert!(matches!(
        failed.unwrap_err(),
        AccountError::StorageUnavailable(_)
    ));

    app.store.set_unavailable(false);
    let created = app
        .accounts
        .register(register_command("jane", "Secret1", &[BuiltInRole::User.id()]))
        .await
        .expect("Retry failed");

    assert_eq!(created.role_names(), vec!["User"]);
}
