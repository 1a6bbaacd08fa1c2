//! The session machine: owns the [`AuthState`] and runs operations against
//! the injected service and storage.

use crate::lifecycle::{LifecycleInput, OperationLifecycle};
use crate::persistence::{self, PersistedSession};
use crate::{reduce, AuthAction, AuthState, Operation, Phase, Rejection};
use auth_config_and_utils::SessionSettings;
use auth_service_client::{AuthService, Credentials, PasswordChange, Registration, SessionRecord};
use session_store::SessionStorage;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Authoritative owner of the authentication state.
///
/// Every transition is applied under the watch channel's lock, so observers
/// only ever see complete records.
pub struct SessionMachine {
    storage: Arc<dyn SessionStorage>,
    service: Arc<dyn AuthService>,
    settings: SessionSettings,
    state_tx: watch::Sender<AuthState>,
    dispatch_seq: AtomicU64,
}

impl SessionMachine {
    /// Create the machine, seeding state synchronously from storage.
    ///
    /// Seeding authenticates only when both token and a parseable user are
    /// stored. It never writes to storage.
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        service: Arc<dyn AuthService>,
        settings: SessionSettings,
    ) -> Self {
        let initial = match persistence::load(storage.as_ref()) {
            Ok(PersistedSession::Present(session)) => {
                debug!("Seeded session from storage");
                AuthState::authenticated(&session)
            }
            Ok(PersistedSession::Malformed) => {
                warn!("Stored session is malformed, starting signed out");
                AuthState::default()
            }
            Ok(PersistedSession::Absent) => AuthState::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored session, starting signed out");
                AuthState::default()
            }
        };

        let (state_tx, _) = watch::channel(initial);

        Self {
            storage,
            service,
            settings,
            state_tx,
            dispatch_seq: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state_tx.borrow().clone()
    }

    /// Receive every published state.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }

    /// Log in and persist the returned session.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionRecord, Rejection> {
        let work = async {
            let session = self
                .service
                .login(credentials)
                .await
                .map_err(|e| Rejection::from_service(Operation::Login, &e))?;
            persistence::save(self.storage.as_ref(), &session)
                .map_err(|e| Rejection::from_storage(Operation::Login, &e))?;
            Ok(session)
        };
        self.run(Operation::Login, AuthAction::Login, work).await
    }

    /// Register a new account and persist the returned session.
    pub async fn register(&self, registration: &Registration) -> Result<SessionRecord, Rejection> {
        let work = async {
            let session = self
                .service
                .register(registration)
                .await
                .map_err(|e| Rejection::from_service(Operation::Register, &e))?;
            persistence::save(self.storage.as_ref(), &session)
                .map_err(|e| Rejection::from_storage(Operation::Register, &e))?;
            Ok(session)
        };
        self.run(Operation::Register, AuthAction::Register, work).await
    }

    /// End the session remotely, then forget it locally.
    pub async fn logout(&self) -> Result<(), Rejection> {
        let work = async {
            self.service
                .logout()
                .await
                .map_err(|e| Rejection::from_service(Operation::Logout, &e))?;
            persistence::clear(self.storage.as_ref())
                .map_err(|e| Rejection::from_storage(Operation::Logout, &e))
        };
        self.run(Operation::Logout, AuthAction::Logout, work).await
    }

    /// Change the account password. Leaves the session untouched.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), Rejection> {
        let work = async {
            self.service
                .change_password(change)
                .await
                .map_err(|e| Rejection::from_service(Operation::ChangePassword, &e))
        };
        self.run(Operation::ChangePassword, AuthAction::ChangePassword, work)
            .await
    }

    /// Restore the session from storage without contacting the service.
    ///
    /// Malformed data restores as no session. It is removed from storage only
    /// when `purge_malformed_session` is set.
    pub async fn check_auth_status(&self) -> Result<Option<SessionRecord>, Rejection> {
        let work = async {
            let persisted = persistence::load(self.storage.as_ref())
                .map_err(|e| Rejection::from_storage(Operation::CheckAuthStatus, &e))?;

            if persisted == PersistedSession::Malformed {
                if self.settings.purge_malformed_session {
                    match persistence::clear(self.storage.as_ref()) {
                        Ok(()) => info!("Purged malformed stored session"),
                        Err(e) => warn!(error = %e, "Failed to purge malformed stored session"),
                    }
                } else {
                    debug!("Ignoring malformed stored session");
                }
            }

            Ok(persisted.into_session())
        };
        self.run(Operation::CheckAuthStatus, AuthAction::CheckAuthStatus, work)
            .await
    }

    /// Clear only the error message.
    pub fn reset_error(&self) {
        self.apply(AuthAction::ResetError);
    }

    /// Return to the signed-out initial shape. Storage is not touched.
    pub fn reset_state(&self) {
        self.apply(AuthAction::ResetState);
    }

    fn apply(&self, action: AuthAction) {
        self.state_tx.send_modify(|state| reduce(state, &action));
    }

    /// Drive one operation through its lifecycle: publish pending, await the
    /// work, then publish the settled phase.
    async fn run<T, F>(
        &self,
        operation: Operation,
        wrap: fn(Phase<T>) -> AuthAction,
        work: F,
    ) -> Result<T, Rejection>
    where
        T: Clone,
        F: Future<Output = Result<T, Rejection>>,
    {
        let sequence = self.dispatch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let mut lifecycle = OperationLifecycle::new(operation, sequence);

        if let Err(e) = lifecycle.advance(&LifecycleInput::Dispatch) {
            warn!(error = %e, "Lifecycle refused dispatch");
        }
        debug!(operation = operation.name(), sequence, "Operation pending");
        self.apply(wrap(Phase::Pending));

        let result = work.await;

        let input = match &result {
            Ok(_) => LifecycleInput::Fulfill,
            Err(_) => LifecycleInput::Reject,
        };
        if let Err(e) = lifecycle.advance(&input) {
            warn!(error = %e, "Lifecycle refused settlement");
        }

        let action = wrap(Phase::from(&result));
        let ignore_stale = self.settings.ignore_stale_completions;
        let applied = self.state_tx.send_if_modified(|state| {
            if ignore_stale && self.dispatch_seq.load(Ordering::SeqCst) != sequence {
                return false;
            }
            reduce(state, &action);
            true
        });

        match (&result, applied) {
            (_, false) => info!(
                operation = operation.name(),
                sequence,
                "Ignoring stale completion"
            ),
            (Ok(_), true) => info!(operation = operation.name(), sequence, "Operation fulfilled"),
            (Err(rejection), true) => warn!(
                operation = operation.name(),
                sequence,
                error = %rejection,
                "Operation rejected"
            ),
        }

        result
    }
}
