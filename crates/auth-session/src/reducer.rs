//! The single reducer applying actions to [`AuthState`].
//!
//! | operation         | pending              | fulfilled                      | rejected                       |
//! |-------------------|----------------------|--------------------------------|--------------------------------|
//! | login             | loading, clear error | authenticated with session     | signed out, error              |
//! | register          | loading, clear error | authenticated with session     | error, session kept            |
//! | logout            | loading, clear error | signed out                     | error, session kept            |
//! | change password   | loading, clear error | settled, session kept          | error, session kept            |
//! | check auth status | loading, clear error | authenticated or signed out    | signed out, error              |

use crate::{AuthAction, AuthState, Phase};

/// Apply `action` to `state`.
pub fn reduce(state: &mut AuthState, action: &AuthAction) {
    match action {
        AuthAction::ResetError => state.error = None,
        AuthAction::ResetState => *state = AuthState::default(),

        AuthAction::Login(phase) => match phase {
            Phase::Pending => state.begin(),
            Phase::Fulfilled(session) => *state = AuthState::authenticated(session),
            Phase::Rejected(rejection) => {
                *state = AuthState::signed_out_with_error(&rejection.message)
            }
        },

        AuthAction::Register(phase) => match phase {
            Phase::Pending => state.begin(),
            Phase::Fulfilled(session) => *state = AuthState::authenticated(session),
            Phase::Rejected(rejection) => state.fail(&rejection.message),
        },

        AuthAction::Logout(phase) => match phase {
            Phase::Pending => state.begin(),
            Phase::Fulfilled(()) => *state = AuthState::default(),
            Phase::Rejected(rejection) => state.fail(&rejection.message),
        },

        AuthAction::ChangePassword(phase) => match phase {
            Phase::Pending => state.begin(),
            Phase::Fulfilled(()) => state.settle(),
            Phase::Rejected(rejection) => state.fail(&rejection.message),
        },

        AuthAction::CheckAuthStatus(phase) => match phase {
            Phase::Pending => state.begin(),
            Phase::Fulfilled(Some(session)) => *state = AuthState::authenticated(session),
            Phase::Fulfilled(None) => *state = AuthState::default(),
            Phase::Rejected(rejection) => {
                *state = AuthState::signed_out_with_error(&rejection.message)
            }
        },
    }
}
