//! Operation phases and the actions the reducer consumes.

use auth_service_client::{ServiceError, SessionRecord};
use session_store::StorageError;
use thiserror::Error;

/// The asynchronous operations of the session machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    Logout,
    ChangePassword,
    CheckAuthStatus,
}

impl Operation {
    /// Message used when a failure carries none of its own.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Login => "Failed to login",
            Operation::Register => "Failed to register",
            Operation::Logout => "Failed to logout",
            Operation::ChangePassword => "Failed to change password",
            Operation::CheckAuthStatus => "Failed to check auth status",
        }
    }

    /// Stable name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Register => "register",
            Operation::Logout => "logout",
            Operation::ChangePassword => "change_password",
            Operation::CheckAuthStatus => "check_auth_status",
        }
    }
}

/// Terminal failure of an operation, reduced to the message shown to users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Rejection {
    pub message: String,
}

impl Rejection {
    /// Build a rejection from an optional message, substituting the operation's fallback.
    pub fn new(operation: Operation, message: Option<&str>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| operation.fallback_message());
        Self {
            message: message.to_string(),
        }
    }

    /// Rejection for a failed service call.
    pub fn from_service(operation: Operation, error: &ServiceError) -> Self {
        Self::new(operation, error.message())
    }

    /// Rejection for a failed storage access; the storage error text is the message.
    pub fn from_storage(operation: Operation, error: &StorageError) -> Self {
        Self::new(operation, Some(&error.to_string()))
    }
}

/// One phase of an operation's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase<T> {
    Pending,
    Fulfilled(T),
    Rejected(Rejection),
}

impl<T: Clone> From<&Result<T, Rejection>> for Phase<T> {
    fn from(result: &Result<T, Rejection>) -> Self {
        match result {
            Ok(value) => Phase::Fulfilled(value.clone()),
            Err(rejection) => Phase::Rejected(rejection.clone()),
        }
    }
}

/// Everything that can change [`AuthState`](crate::AuthState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Login(Phase<SessionRecord>),
    Register(Phase<SessionRecord>),
    Logout(Phase<()>),
    ChangePassword(Phase<()>),
    CheckAuthStatus(Phase<Option<SessionRecord>>),
    ResetError,
    ResetState,
}
