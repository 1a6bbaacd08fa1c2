//! The auth service contract.

use crate::{Credentials, PasswordChange, Registration, ServiceResult, SessionRecord};
use async_trait::async_trait;

/// Remote authentication service.
///
/// Every call either succeeds or fails with a [`ServiceError`](crate::ServiceError)
/// that may carry a human-readable message.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, credentials: &Credentials) -> ServiceResult<SessionRecord>;

    /// Create an account and return its session.
    async fn register(&self, registration: &Registration) -> ServiceResult<SessionRecord>;

    /// End the current session server-side.
    async fn logout(&self) -> ServiceResult<()>;

    /// Change the password of the account owning `change.token`.
    async fn change_password(&self, change: &PasswordChange) -> ServiceResult<()>;
}
