//! Test harness for session machine tests.
//!
//! Provides:
//! - FakeAuthService: scripted replies per call, optional gates to hold a call open
//! - TestStorage: in-memory storage with switchable failures
//! - TestHarness: a SessionMachine wired to both

use crate::{SessionMachine, SessionSettings};
use async_trait::async_trait;
use auth_service_client::{
    AuthService, Credentials, PasswordChange, Registration, ServiceError, ServiceResult,
    SessionRecord, User,
};
use session_store::{MemoryStorage, SessionStorage, StorageError, StorageResult};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub const USER_JSON: &str = r#"{"id":"1","name":"A","email":"a@x.com"}"#;

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("User {}", id),
        email: format!("{}@x.com", id),
    }
}

pub fn session(token: &str, id: &str) -> SessionRecord {
    SessionRecord {
        token: token.to_string(),
        user: user(id),
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("a@x.com", "hunter2")
}

pub fn registration() -> Registration {
    Registration::new("A", "a@x.com", "hunter2")
}

pub fn password_change() -> PasswordChange {
    PasswordChange::new("hunter2", "correct-horse", "abc")
}

/// Holds a scripted call open until the test releases it.
pub struct Gate {
    entered: Option<oneshot::Receiver<()>>,
    release: Option<oneshot::Sender<()>>,
}

impl Gate {
    /// Wait until the service call has started.
    pub async fn entered(&mut self) {
        if let Some(rx) = self.entered.take() {
            let _ = rx.await;
        }
    }

    /// Let the service call return its scripted result.
    pub fn release(&mut self) {
        if let Some(tx) = self.release.take() {
            let _ = tx.send(());
        }
    }
}

struct Hold {
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

struct Reply<T> {
    result: ServiceResult<T>,
    hold: Option<Hold>,
}

impl<T> Reply<T> {
    async fn deliver(self) -> ServiceResult<T> {
        if let Some(hold) = self.hold {
            let _ = hold.entered.send(());
            let _ = hold.release.await;
        }
        self.result
    }
}

struct Script<T> {
    replies: Mutex<VecDeque<Reply<T>>>,
    calls: AtomicUsize,
}

impl<T> Script<T> {
    fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn push(&self, result: ServiceResult<T>) {
        self.replies.lock().unwrap().push_back(Reply { result, hold: None });
    }

    fn push_gated(&self, result: ServiceResult<T>) -> Gate {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(Reply {
            result,
            hold: Some(Hold {
                entered: entered_tx,
                release: release_rx,
            }),
        });
        Gate {
            entered: Some(entered_rx),
            release: Some(release_tx),
        }
    }

    /// Next scripted reply, or `default` when nothing is queued.
    fn next(&self, default: impl FnOnce() -> ServiceResult<T>) -> Reply<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| Reply {
            result: default(),
            hold: None,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Scripted auth service.
///
/// Unscripted login/register calls fail without a message; unscripted
/// logout/change-password calls succeed.
pub struct FakeAuthService {
    login: Script<SessionRecord>,
    register: Script<SessionRecord>,
    logout: Script<()>,
    change_password: Script<()>,
    last_email: Mutex<Option<String>>,
}

impl FakeAuthService {
    pub fn new() -> Self {
        Self {
            login: Script::new(),
            register: Script::new(),
            logout: Script::new(),
            change_password: Script::new(),
            last_email: Mutex::new(None),
        }
    }

    pub fn push_login(&self, result: ServiceResult<SessionRecord>) {
        self.login.push(result);
    }

    pub fn push_login_gated(&self, result: ServiceResult<SessionRecord>) -> Gate {
        self.login.push_gated(result)
    }

    pub fn push_register(&self, result: ServiceResult<SessionRecord>) {
        self.register.push(result);
    }

    pub fn push_register_gated(&self, result: ServiceResult<SessionRecord>) -> Gate {
        self.register.push_gated(result)
    }

    pub fn push_logout(&self, result: ServiceResult<()>) {
        self.logout.push(result);
    }

    pub fn push_logout_gated(&self, result: ServiceResult<()>) -> Gate {
        self.logout.push_gated(result)
    }

    pub fn push_change_password(&self, result: ServiceResult<()>) {
        self.change_password.push(result);
    }

    pub fn push_change_password_gated(&self, result: ServiceResult<()>) -> Gate {
        self.change_password.push_gated(result)
    }

    pub fn login_calls(&self) -> usize {
        self.login.calls()
    }

    pub fn register_calls(&self) -> usize {
        self.register.calls()
    }

    pub fn logout_calls(&self) -> usize {
        self.logout.calls()
    }

    pub fn change_password_calls(&self) -> usize {
        self.change_password.calls()
    }

    pub fn total_calls(&self) -> usize {
        self.login_calls() + self.register_calls() + self.logout_calls() + self.change_password_calls()
    }

    pub fn last_email(&self) -> Option<String> {
        self.last_email.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthService for FakeAuthService {
    async fn login(&self, credentials: &Credentials) -> ServiceResult<SessionRecord> {
        *self.last_email.lock().unwrap() = Some(credentials.email.clone());
        let reply = self.login.next(|| Err(ServiceError::without_message()));
        reply.deliver().await
    }

    async fn register(&self, registration: &Registration) -> ServiceResult<SessionRecord> {
        *self.last_email.lock().unwrap() = Some(registration.email.clone());
        let reply = self.register.next(|| Err(ServiceError::without_message()));
        reply.deliver().await
    }

    async fn logout(&self) -> ServiceResult<()> {
        let reply = self.logout.next(|| Ok(()));
        reply.deliver().await
    }

    async fn change_password(&self, _change: &PasswordChange) -> ServiceResult<()> {
        let reply = self.change_password.next(|| Ok(()));
        reply.deliver().await
    }
}

/// In-memory storage whose reads, writes and removals can be made to fail.
#[derive(Default)]
pub struct TestStorage {
    inner: MemoryStorage,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_write_key: Mutex<Option<String>>,
    fail_removes: AtomicBool,
}

impl TestStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            inner: MemoryStorage::with_entries(entries),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Refuse writes to `key` only.
    pub fn fail_writes_to(&self, key: &str) {
        *self.fail_write_key.lock().unwrap() = Some(key.to_string());
    }

    pub fn fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SessionStorage for TestStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("write refused".to_string()));
        }
        if self.fail_write_key.lock().unwrap().as_deref() == Some(key) {
            return Err(StorageError::Backend("disk full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("read refused".to_string()));
        }
        self.inner.get(key)
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("remove refused".to_string()));
        }
        self.inner.remove(key)
    }
}

/// A machine wired to a fake service and test storage.
pub struct TestHarness {
    pub storage: Arc<TestStorage>,
    pub service: Arc<FakeAuthService>,
    pub machine: Arc<SessionMachine>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(TestStorage::new(), SessionSettings::default())
    }

    pub fn with_storage(storage: TestStorage) -> Self {
        Self::build(storage, SessionSettings::default())
    }

    pub fn with_settings(settings: SessionSettings) -> Self {
        Self::build(TestStorage::new(), settings)
    }

    pub fn build(storage: TestStorage, settings: SessionSettings) -> Self {
        let storage = Arc::new(storage);
        let service = Arc::new(FakeAuthService::new());
        let machine = Arc::new(SessionMachine::new(
            storage.clone(),
            service.clone(),
            settings,
        ));
        Self {
            storage,
            service,
            machine,
        }
    }

    /// Harness whose machine is already signed in as `session`.
    pub async fn signed_in(session: SessionRecord) -> Self {
        let harness = Self::new();
        harness.service.push_login(Ok(session));
        harness.machine.login(&credentials()).await.unwrap();
        harness
    }
}
