//! Injectable session provider.
//!
//! The dashboard shell, the access gate and the analytics screen all read
//! the same session. Instead of each reaching into ambient storage, they
//! share one [`SessionStore`] handle with explicit read/write/clear and
//! change notification.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub agency_id: String,
    pub agency_name: Option<String>,
}

/// Cheap to clone; all clones observe the same session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    /// An empty store: no one is signed in.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.set(session);
        store
    }

    pub fn get(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn agency_id(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.agency_id.clone())
    }

    /// Set on login.
    pub fn set(&self, session: Session) {
        self.tx.send_replace(Some(session));
    }

    /// Cleared on logout or on any 401 from the backend.
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Subscribe to session changes. Receivers wake on set and clear, which
    /// is how the shell learns it must route back to login.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
