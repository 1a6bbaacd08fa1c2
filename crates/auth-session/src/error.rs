//! Session machine error types.

use thiserror::Error;

/// Internal errors of the session machine.
///
/// Operation failures are not errors here: they settle as a
/// [`Rejection`](crate::Rejection) and are recorded in the state.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Invalid transition in an operation lifecycle
    #[error("Invalid operation lifecycle transition: {0}")]
    InvalidLifecycleTransition(String),
}

/// Result type alias using SessionError.
pub type SessionResult<T> = Result<T, SessionError>;
