//! The session record observed by consumers.

use auth_service_client::{SessionRecord, User};
use serde::{Deserialize, Serialize};

/// Authentication state shared by every consumer.
///
/// `is_authenticated` implies `user` and `token` are both present; the
/// helpers below are the only places that set it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// Authenticated, settled state for a known session.
    pub fn authenticated(session: &SessionRecord) -> Self {
        Self {
            user: Some(session.user.clone()),
            token: Some(session.token.clone()),
            is_authenticated: true,
            loading: false,
            error: None,
        }
    }

    /// Logged-out state carrying a failure message.
    pub fn signed_out_with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Whether the record satisfies the authenticated-implies-session invariant.
    pub fn is_consistent(&self) -> bool {
        !self.is_authenticated || (self.user.is_some() && self.token.is_some())
    }

    /// Mark an operation as in flight and clear the previous error.
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Settle an operation successfully without touching the session fields.
    pub(crate) fn settle(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// Settle an operation with a failure, keeping the session fields.
    pub(crate) fn fail(&mut self, message: &str) {
        self.loading = false;
        self.error = Some(message.to_string());
    }
}
