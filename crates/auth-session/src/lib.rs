//! Authentication session state for Taskdeck clients.
//!
//! This crate provides:
//! - [`AuthState`], the single session record consumers render from
//! - [`SessionMachine`], which runs login / register / logout / change-password /
//!   restore against injected service and storage collaborators
//! - A pure [`reduce`] function applying each operation's pending, fulfilled,
//!   or rejected phase to the record
//! - A per-call lifecycle FSM guaranteeing every operation settles exactly once

mod action;
mod error;
mod lifecycle;
mod machine;
mod persistence;
mod reducer;
mod state;

#[cfg(test)]
mod tests;

pub use action::{AuthAction, Operation, Phase, Rejection};
pub use error::{SessionError, SessionResult};
pub use lifecycle::{
    operation_lifecycle, LifecycleInput, LifecycleMachine, LifecyclePhase, OperationLifecycle,
};
pub use machine::SessionMachine;
pub use persistence::PersistedSession;
pub use reducer::reduce;
pub use state::AuthState;

pub use auth_config_and_utils::SessionSettings;
pub use auth_service_client::{Credentials, PasswordChange, Registration, SessionRecord, User};
