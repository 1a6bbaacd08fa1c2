//! Scenario tests for the session machine.
//!
//! - `login.rs`           - login success, failure, write-through
//! - `register.rs`        - registration success and preserved session on failure
//! - `logout.rs`          - logout success, idempotent removal, failures
//! - `change_password.rs` - password change never touches the session
//! - `restore.rs`         - seeding and check_auth_status, malformed data, purge switch
//! - `resets.rs`          - reset_error and reset_state
//! - `concurrency.rs`     - overlapping operations, observers, stale completion guard

mod harness;

mod register;

use harness::{credentials, session, TestHarness};

/// Restore, log in, change password, log out.
#[tokio::test]
async fn basic_workflow() {
    let harness = TestHarness::new();
    let machine = &harness.machine;

    assert_eq!(machine.check_auth_status().await.unwrap(), None);
    assert!(!machine.state().is_authenticated);

    harness.service.push_login(Ok(session("abc", "1")));
    machine.login(&credentials()).await.unwrap();
    assert!(machine.state().is_authenticated);

    machine
        .change_password(&harness::password_change())
        .await
        .unwrap();
    assert!(machine.state().is_authenticated);

    machine.logout().await.unwrap();
    assert_eq!(machine.state(), crate::AuthState::default());
    assert!(harness.storage.is_empty());
}
