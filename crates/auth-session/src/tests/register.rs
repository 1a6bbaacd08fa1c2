//! Registration scenarios.

use super::harness::{registration, session, TestHarness};
use auth_service_client::ServiceError;

#[tokio::test]
async fn register_success_authenticates_and_persists() {
    let harness = TestHarness::new();
    harness.service.push_register(Ok(session("new-tok", "9")));

    let returned = harness.machine.register(&registration()).await.unwrap();
    assert_eq!(returned.token, "new-tok");

    let state = harness.machine.state();
    assert!(state.is_authenticated);
    assert_eq!(state.token.as_deref(), Some("new-tok"));
    assert_eq!(state.user, Some(session("new-tok", "9").user));
    assert!(!state.loading);
    assert!(state.error.is_none());

    assert_eq!(harness.storage.value("token").as_deref(), Some("new-tok"));
    assert!(harness.storage.value("user").is_some());
    assert_eq!(harness.service.register_calls(), 1);
}

#[tokio::test]
async fn register_failure_preserves_signed_in_session() {
    let harness = TestHarness::signed_in(session("old", "1")).await;
    harness
        .service
        .push_register(Err(ServiceError::with_message("Email already registered")));

    let before = harness.machine.state();
    let rejection = harness.machine.register(&registration()).await.unwrap_err();
    assert_eq!(rejection.message, "Email already registered");

    let after = harness.machine.state();
    assert_eq!(after.user, before.user);
    assert_eq!(after.token, before.token);
    assert!(after.is_authenticated);
    assert!(!after.loading);
    assert_eq!(after.error.as_deref(), Some("Email already registered"));
    assert_eq!(harness.storage.value("token").as_deref(), Some("old"));
}

#[tokio::test]
async fn register_failure_preserves_signed_out_session() {
    let harness = TestHarness::new();
    harness.service.push_register(Err(ServiceError::without_message()));

    let rejection = harness.machine.register(&registration()).await.unwrap_err();
    assert_eq!(rejection.message, "Failed to register");

    let state = harness.machine.state();
    assert!(!state.is_authenticated);
    assert!(state.user.is_none());
    assert_eq!(state.error.as_deref(), Some("Failed to register"));
    assert!(harness.storage.is_empty());
}
