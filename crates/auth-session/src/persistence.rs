//! Reading and writing the persisted session through a [`SessionStorage`].

use auth_service_client::{SessionRecord, User};
use session_store::{SessionStorage, StorageKeys, StorageResult};
use tracing::{debug, warn};

/// What the store holds for the session keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedSession {
    /// Token or user missing (or empty).
    Absent,
    /// Both keys present but the user value does not parse.
    Malformed,
    Present(SessionRecord),
}

impl PersistedSession {
    pub fn into_session(self) -> Option<SessionRecord> {
        match self {
            PersistedSession::Present(session) => Some(session),
            PersistedSession::Absent | PersistedSession::Malformed => None,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Read the persisted session. Only storage failures are errors.
pub(crate) fn load(storage: &dyn SessionStorage) -> StorageResult<PersistedSession> {
    let token = non_empty(storage.get(StorageKeys::TOKEN)?);
    let user = non_empty(storage.get(StorageKeys::USER)?);

    let (Some(token), Some(user)) = (token, user) else {
        return Ok(PersistedSession::Absent);
    };

    match serde_json::from_str::<User>(&user) {
        Ok(user) => Ok(PersistedSession::Present(SessionRecord { token, user })),
        Err(e) => {
            debug!(error = %e, "Persisted user is not valid JSON");
            Ok(PersistedSession::Malformed)
        }
    }
}

/// Write the token raw and the user as JSON.
///
/// If either write fails both keys are removed, so a half-written pair
/// never outlives the failed call.
pub(crate) fn save(storage: &dyn SessionStorage, session: &SessionRecord) -> StorageResult<()> {
    let user = serde_json::to_string(&session.user)?;
    let written = storage
        .set(StorageKeys::TOKEN, &session.token)
        .and_then(|()| storage.set(StorageKeys::USER, &user));

    if let Err(e) = written {
        if let Err(clear_err) = clear(storage) {
            warn!(error = %clear_err, "Failed to clear partially written session");
        }
        return Err(e);
    }
    Ok(())
}

/// Remove both keys. Removing absent keys succeeds.
pub(crate) fn clear(storage: &dyn SessionStorage) -> StorageResult<()> {
    storage.remove(StorageKeys::TOKEN)?;
    storage.remove(StorageKeys::USER)?;
    Ok(())
}
