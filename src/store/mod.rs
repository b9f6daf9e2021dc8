pub mod operations;
pub mod snapshot;

use std::sync::Mutex;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::seed;
use crate::session::UserSession;
use crate::store::snapshot::{AppSnapshot, SledSnapshotPort, SnapshotPort};
use crate::sync::relay::RelayOp;

/// Canonical in-memory state, persisted in full after every mutation.
///
/// Mutations are total: they never report errors to callers and never leave
/// the state partially applied. A persistence failure is logged and the
/// in-memory copy stays authoritative. When a user session is attached,
/// mutations on shared entities additionally enqueue a fire-and-forget relay
/// operation; the enqueue never blocks and a relay failure never rolls the
/// local mutation back.
pub struct Store {
    state: Mutex<AppSnapshot>,
    port: Box<dyn SnapshotPort>,
    session: Mutex<Option<UserSession>>,
    relay: Mutex<Option<UnboundedSender<RelayOp>>>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Store {
    /// Opens the sled-backed store at `path`. A missing snapshot falls back
    /// to the built-in sample decks and words.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let port = SledSnapshotPort::open(path)?;
        Self::with_port(Box::new(port))
    }

    /// Builds a store on any persistence port. Used by tests and by callers
    /// that bring their own storage.
    pub fn with_port(port: Box<dyn SnapshotPort>) -> Result<Self, StoreError> {
        let state = match port.load()? {
            Some(snapshot) => snapshot,
            None => {
                tracing::info!("No persisted snapshot found, seeding sample content");
                AppSnapshot {
                    words: seed::seed_words(),
                    decks: seed::seed_decks(),
                    ..AppSnapshot::default()
                }
            }
        };

        Ok(Self {
            state: Mutex::new(state),
            port,
            session: Mutex::new(None),
            relay: Mutex::new(None),
        })
    }

    /// Applies one atomic state transition and persists the full snapshot.
    /// Readers never observe a partially applied mutation.
    pub(crate) fn mutate<R>(&self, f: impl FnOnce(&mut AppSnapshot) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let result = f(&mut state);
        if let Err(e) = self.port.save(&state) {
            tracing::error!(error = %e, "Failed to persist snapshot, in-memory state remains authoritative");
        }
        result
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&AppSnapshot) -> R) -> R {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&state)
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.read(|state| state.clone())
    }

    /// Attaches the outbound relay queue. Mutations enqueue onto it only
    /// while a session is present.
    pub fn attach_relay(&self, sender: UnboundedSender<RelayOp>) {
        let mut relay = self.relay.lock().unwrap_or_else(|e| e.into_inner());
        *relay = Some(sender);
    }

    pub fn set_session(&self, session: Option<UserSession>) {
        let mut guard = self.session.lock().unwrap_or_else(|e| e.into_inner());
        *guard = session;
    }

    pub fn session(&self) -> Option<UserSession> {
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Enqueues a relay operation when a user is signed in and a relay queue
    /// is attached. Never blocks; a closed queue is logged and ignored.
    pub(crate) fn relay_with_user(&self, build: impl FnOnce(&UserSession) -> RelayOp) {
        let Some(user) = self.session() else {
            return;
        };
        let relay = self.relay.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(sender) = relay.as_ref() {
            let op = build(&user);
            if sender.send(op).is_err() {
                tracing::debug!("Relay queue closed, dropping outbound operation");
            }
        }
    }

    pub fn set_theme(&self, is_dark: bool) {
        self.mutate(|state| state.is_dark_mode = is_dark);
    }

    pub fn toggle_theme(&self) {
        self.mutate(|state| state.is_dark_mode = !state.is_dark_mode);
    }

    pub fn is_dark_mode(&self) -> bool {
        self.read(|state| state.is_dark_mode)
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.port.flush()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn seeds_sample_content_when_snapshot_missing() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("seed.sled").to_str().unwrap()).unwrap();

        assert_eq!(store.decks().len(), 3);
        assert_eq!(store.words().len(), 7);
        assert!(!store.is_dark_mode());
    }

    #[test]
    fn state_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.sled");
        let path = path.to_str().unwrap();

        {
            let store = Store::open(path).unwrap();
            store.replace_words(Vec::new());
            store.replace_decks(Vec::new());
            store.set_theme(true);
            store.add_xp(30);
            store.flush().unwrap();
        }

        let store = Store::open(path).unwrap();
        // Reopen must load the persisted snapshot, not re-seed.
        assert!(store.decks().is_empty());
        assert!(store.words().is_empty());
        assert!(store.is_dark_mode());
        assert_eq!(store.xp(), 30);
    }

    #[test]
    fn theme_toggles() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("theme.sled").to_str().unwrap()).unwrap();

        assert!(!store.is_dark_mode());
        store.toggle_theme();
        assert!(store.is_dark_mode());
        store.set_theme(false);
        assert!(!store.is_dark_mode());
    }

    #[test]
    fn session_gates_are_settable() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("session.sled").to_str().unwrap()).unwrap();

        assert!(store.session().is_none());
        store.set_session(Some(crate::session::UserSession::new("u1")));
        assert_eq!(store.session().unwrap().user_id, "u1");
        store.set_session(None);
        assert!(store.session().is_none());
    }
}
