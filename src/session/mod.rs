//! Session lifecycle: hydrate from durable storage at startup, update on
//! login, clear on logout.
//!
//! The store is the single source of truth for the current identity. Durable
//! storage is best effort: a record that cannot be read, parsed or validated
//! is discarded and the store reports "no session" rather than failing.

mod storage;
mod types;

pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage, SESSION_KEY};
pub use types::{Role, Session};

pub(crate) use types::StoredSession;

use crate::error::Error;
use crate::guard::{self, GuardOutcome};
use log::warn;
use std::sync::{Arc, Mutex};

struct SessionState {
    session: Option<Session>,
    loading: bool,
}

/// Holds the current authenticated identity for the lifetime of the client.
///
/// Starts in the loading state; [`hydrate`](SessionStore::hydrate) resolves
/// it by reading the persisted record. All methods take `&self`, so the store
/// is shared behind an [`Arc`].
pub struct SessionStore {
    state: Mutex<SessionState>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Store backed by the given storage, not yet hydrated.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: Mutex::new(SessionState {
                session: None,
                loading: true,
            }),
            storage,
        }
    }

    /// Store with in-process storage only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStorage::new()))
    }

    /// Read and validate the persisted record.
    ///
    /// An absent record, unparseable JSON or a record with any of the five
    /// fields missing or empty all resolve to "no session"; invalid records
    /// are removed from storage. Always clears the loading flag.
    pub fn hydrate(&self) -> Option<Session> {
        let session = match self.storage.load() {
            Ok(Some(raw)) => {
                let parsed = serde_json::from_str::<StoredSession>(&raw)
                    .ok()
                    .and_then(StoredSession::into_session);
                if parsed.is_none() {
                    warn!("discarding invalid persisted session record");
                    self.discard_record();
                }
                parsed
            }
            Ok(None) => None,
            Err(err) => {
                warn!("failed to read persisted session: {err}");
                None
            }
        };

        let mut state = self.state.lock().unwrap();
        state.session = session.clone();
        state.loading = false;
        session
    }

    /// Install a freshly issued session and persist it.
    ///
    /// The in-memory session is authoritative; a persistence failure is
    /// logged and the login still takes effect.
    pub fn login(&self, session: Session) {
        match serde_json::to_string(&session) {
            Ok(raw) => {
                if let Err(err) = self.storage.store(&raw) {
                    warn!("failed to persist session: {err}");
                }
            }
            Err(err) => warn!("failed to serialize session: {err}"),
        }
        let mut state = self.state.lock().unwrap();
        state.session = Some(session);
        state.loading = false;
    }

    /// Drop the session and remove the persisted record.
    pub fn logout(&self) {
        self.discard_record();
        let mut state = self.state.lock().unwrap();
        state.session = None;
        state.loading = false;
    }

    /// Current session, if any
    pub fn session(&self) -> Option<Session> {
        self.state.lock().unwrap().session.clone()
    }

    /// Whether hydration has not finished yet
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// Whether a session with a usable token is present
    pub fn is_authenticated(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .session
            .as_ref()
            .map(|s| !s.token.is_empty())
            .unwrap_or(false)
    }

    /// Bearer token of the current session
    pub fn token(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .session
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// Bearer token of the current session, or [`Error::NotAuthenticated`].
    ///
    /// Protected API calls use this to fail before any network traffic when
    /// nobody is logged in.
    pub fn require_token(&self) -> Result<String, Error> {
        self.token().ok_or(Error::NotAuthenticated)
    }

    /// Role of the current session
    pub fn role(&self) -> Option<Role> {
        self.state.lock().unwrap().session.as_ref().map(|s| s.role)
    }

    /// Evaluate the route guard against the current state.
    pub fn check_access(&self, required: Option<Role>) -> GuardOutcome {
        let state = self.state.lock().unwrap();
        guard::evaluate(state.loading, state.session.as_ref(), required)
    }

    fn discard_record(&self) {
        if let Err(err) = self.storage.clear() {
            warn!("failed to clear persisted session: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session::new("tok-1", "7", "Budi", "budi@example.com", Role::User)
    }

    #[test]
    fn starts_loading_without_session() {
        let store = SessionStore::in_memory();
        assert!(store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn hydrate_with_empty_storage_resolves_to_no_session() {
        let store = SessionStore::in_memory();
        assert_eq!(store.hydrate(), None);
        assert!(!store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn hydrate_discards_record_missing_a_field() {
        let storage = Arc::new(MemorySessionStorage::new());
        storage
            .store(r#"{"token":"tok","userId":"7","name":"Budi","email":"b@x.id"}"#)
            .unwrap();
        let store = SessionStore::new(storage.clone());
        assert_eq!(store.hydrate(), None);
        assert!(!store.is_authenticated());
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn hydrate_discards_unparseable_record() {
        let storage = Arc::new(MemorySessionStorage::new());
        storage.store("not json").unwrap();
        let store = SessionStore::new(storage.clone());
        assert_eq!(store.hydrate(), None);
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn hydrate_restores_complete_record() {
        let storage = Arc::new(MemorySessionStorage::new());
        storage
            .store(
                r#"{"token":"tok","userId":"7","name":"Budi","email":"b@x.id","role":"Admin"}"#,
            )
            .unwrap();
        let store = SessionStore::new(storage);
        let session = store.hydrate().unwrap();
        assert_eq!(session.role, Role::Admin);
        assert!(store.is_authenticated());
        assert!(!store.is_loading());
    }

    #[test]
    fn login_then_hydrate_in_fresh_store_round_trips() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemorySessionStorage::new());
        let first = SessionStore::new(storage.clone());
        first.login(sample_session());

        let second = SessionStore::new(storage);
        assert_eq!(second.hydrate(), Some(sample_session()));
    }

    #[test]
    fn logout_clears_state_and_storage() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = SessionStore::new(storage.clone());
        store.login(sample_session());
        assert!(store.is_authenticated());

        store.logout();
        assert!(!store.is_authenticated());
        assert_eq!(store.session(), None);
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn login_overwrites_previous_session() {
        let store = SessionStore::in_memory();
        store.login(sample_session());
        store.login(Session::new("tok-2", "8", "Siti", "siti@example.com", Role::Admin));
        let session = store.session().unwrap();
        assert_eq!(session.user_id, "8");
        assert_eq!(session.role, Role::Admin);
    }
}
