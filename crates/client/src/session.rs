//! The session holder.
//!
//! Owns the single live session of a browser context. The session is kept
//! in two places: the durable store (so new tabs and reloads see it) and an
//! in-memory `watch` channel (so views can react to changes).
//!
//! # Durable keys
//!
//! - `authUser` - the identity as JSON
//! - `authToken` - the opaque marker
//!
//! # Invariants
//!
//! - At most one session exists. Saving overwrites; it never appends.
//! - A corrupt identity blob never becomes a session. It is purged and the
//!   holder reports "unauthenticated".
//! - Changes made by other tabs are a signal to re-read the store. There is
//!   no merge: the last write to the store wins.

use core::fmt;

use bookstore_core::Identity;
use tokio::sync::{broadcast, watch};

use crate::storage::{DurableStore, StorageError, StorageEvent};

/// Durable key holding the identity JSON.
pub const USER_KEY: &str = "authUser";

/// Durable key holding the marker.
pub const TOKEN_KEY: &str = "authToken";

/// Opaque bearer value issued by the auth gateway.
///
/// Never inspected or validated locally. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Marker(String);

impl Marker {
    /// Wrap a raw marker.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw marker, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether no marker was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Marker([REDACTED])")
    }
}

/// The live (identity, marker) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Identity,
    pub marker: Marker,
}

/// Holds at most one session for a browser context.
pub struct SessionHolder<S> {
    store: S,
    events: broadcast::Receiver<StorageEvent>,
    state: watch::Sender<Option<Session>>,
}

impl<S: DurableStore> SessionHolder<S> {
    /// Attach to a store and load whatever session it holds.
    #[must_use]
    pub fn new(store: S) -> Self {
        let events = store.subscribe();
        let (state, _) = watch::channel(None);
        let holder = Self {
            store,
            events,
            state,
        };
        holder.load();
        holder
    }

    /// Re-read the durable store and publish the result.
    ///
    /// A missing identity means "unauthenticated". An identity that does not
    /// parse is removed (together with its marker) and also means
    /// "unauthenticated". A missing marker next to a valid identity yields
    /// an empty marker.
    pub fn load(&self) -> Option<Session> {
        let session = self.read_store();
        self.publish(session.clone());
        session
    }

    /// Persist a new session, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store rejects the write. In-memory state
    /// is only updated after both keys are written.
    pub fn save(&self, identity: Identity, marker: Marker) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&identity)?;
        // Marker first. Other tabs reload on the identity write only, so
        // they never pair the new marker with the old identity.
        self.store.set(TOKEN_KEY, marker.expose())?;
        self.store.set(USER_KEY, &blob)?;

        tracing::info!(user_id = %identity.id, tab = %self.store.tab(), "Session saved");
        self.publish(Some(Session { identity, marker }));
        Ok(())
    }

    /// Remove the session from the store and from memory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store rejects the removal. In-memory
    /// state is reset regardless.
    pub fn clear(&self) -> Result<(), StorageError> {
        let result = self
            .store
            .remove(USER_KEY)
            .and_then(|()| self.store.remove(TOKEN_KEY));
        self.publish(None);
        tracing::info!(tab = %self.store.tab(), "Session cleared");
        result
    }

    /// Current session, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    /// Whether a session is live.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Watch session changes. The receiver starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Apply pending changes made by other tabs.
    ///
    /// Returns `true` if the in-memory session changed.
    pub fn sync(&mut self) -> bool {
        let mut stale = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => stale |= self.is_foreign_session_change(&event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Storage events lagged, reloading session");
                    stale = true;
                }
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => break,
            }
        }

        if !stale {
            return false;
        }
        let before = self.current();
        self.load() != before
    }

    /// Follow changes from other tabs until the store shuts down.
    pub async fn run(&mut self) {
        loop {
            match self.events.recv().await {
                Ok(event) => {
                    if self.is_foreign_session_change(&event) {
                        self.load();
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    self.load();
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    /// The identity key is written last on save and removed first on clear,
    /// so its event marks a complete change.
    fn is_foreign_session_change(&self, event: &StorageEvent) -> bool {
        event.origin != self.store.tab() && event.touches(USER_KEY)
    }

    fn read_store(&self) -> Option<Session> {
        let blob = self.store.get(USER_KEY)?;

        match serde_json::from_str::<Identity>(&blob) {
            Ok(identity) => {
                let marker = Marker::new(self.store.get(TOKEN_KEY).unwrap_or_default());
                Some(Session { identity, marker })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored session");
                for key in [USER_KEY, TOKEN_KEY] {
                    if let Err(e) = self.store.remove(key) {
                        tracing::warn!(key, error = %e, "Failed to purge stored session");
                    }
                }
                None
            }
        }
    }

    fn publish(&self, session: Option<Session>) {
        self.state.send_if_modified(|current| {
            if *current == session {
                false
            } else {
                *current = session;
                true
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use bookstore_core::{Email, Role, UserId};

    fn jane() -> Identity {
        Identity::new(
            UserId::new(3),
            "Jane Doe",
            Email::parse("jane@example.com").unwrap(),
        )
        .with_role(Role::Admin)
    }

    fn john() -> Identity {
        Identity::new(
            UserId::new(1),
            "John Doe",
            Email::parse("user@example.com").unwrap(),
        )
    }

    #[test]
    fn test_empty_store_is_unauthenticated() {
        let holder = SessionHolder::new(MemoryStore::new());
        assert_eq!(holder.load(), None);
        assert!(!holder.is_authenticated());
    }

    #[test]
    fn test_save_then_load_returns_identity() {
        let holder = SessionHolder::new(MemoryStore::new());
        holder.save(jane(), Marker::new("demo-token-1")).unwrap();

        let session = holder.load().unwrap();
        assert_eq!(session.identity, jane());
        assert_eq!(session.marker.expose(), "demo-token-1");
    }

    #[test]
    fn test_new_tab_sees_saved_session() {
        let store = MemoryStore::new();
        SessionHolder::new(store.clone())
            .save(jane(), Marker::new("demo-token-1"))
            .unwrap();

        let other = SessionHolder::new(store.new_tab());
        assert_eq!(other.current().unwrap().identity, jane());
    }

    #[test]
    fn test_second_save_overwrites() {
        let store = MemoryStore::new();
        let holder = SessionHolder::new(store.clone());
        holder.save(jane(), Marker::new("first")).unwrap();
        holder.save(john(), Marker::new("second")).unwrap();

        let session = holder.load().unwrap();
        assert_eq!(session.identity, john());
        assert_eq!(session.marker.expose(), "second");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("second"));
    }

    #[test]
    fn test_non_json_blob_self_heals() {
        let store = MemoryStore::new();
        let holder = SessionHolder::new(store.clone());
        store.set(USER_KEY, "definitely not json").unwrap();
        store.set(TOKEN_KEY, "demo-token-9").unwrap();

        assert_eq!(holder.load(), None);
        assert_eq!(store.get(USER_KEY), None);
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_wrong_shape_blob_self_heals() {
        let store = MemoryStore::new();
        store.set(USER_KEY, r#"{"name":"No Id"}"#).unwrap();

        let holder = SessionHolder::new(store.clone());
        assert!(!holder.is_authenticated());
        assert_eq!(store.get(USER_KEY), None);
    }

    #[test]
    fn test_missing_marker_yields_empty_marker() {
        let store = MemoryStore::new();
        store
            .set(USER_KEY, &serde_json::to_string(&john()).unwrap())
            .unwrap();

        let session = SessionHolder::new(store).current().unwrap();
        assert_eq!(session.identity, john());
        assert!(session.marker.is_empty());
    }

    #[test]
    fn test_clear_removes_durable_entry() {
        let store = MemoryStore::new();
        let holder = SessionHolder::new(store.clone());
        holder.save(jane(), Marker::new("m")).unwrap();
        holder.clear().unwrap();

        assert_eq!(holder.current(), None);
        assert_eq!(store.get(USER_KEY), None);
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_logout_in_other_tab_propagates() {
        let store = MemoryStore::new();
        let first = SessionHolder::new(store.clone());
        let mut second = SessionHolder::new(store.new_tab());

        first.save(jane(), Marker::new("m")).unwrap();
        assert!(second.sync());
        assert_eq!(second.current().unwrap().identity, jane());

        first.clear().unwrap();
        assert!(second.sync());
        assert!(!second.is_authenticated());
    }

    #[test]
    fn test_own_writes_do_not_trigger_sync() {
        let mut holder = SessionHolder::new(MemoryStore::new());
        holder.save(jane(), Marker::new("m")).unwrap();
        assert!(!holder.sync());
        assert!(holder.is_authenticated());
    }

    #[test]
    fn test_marker_write_alone_does_not_reload() {
        let store = MemoryStore::new();
        let mut holder = SessionHolder::new(store.new_tab());
        holder.save(john(), Marker::new("old")).unwrap();

        // Another tab is halfway through saving.
        store.set(TOKEN_KEY, "new").unwrap();
        assert!(!holder.sync());
        assert_eq!(holder.current().unwrap().marker, Marker::new("old"));

        store
            .set(USER_KEY, &serde_json::to_string(&jane()).unwrap())
            .unwrap();
        assert!(holder.sync());
        let session = holder.current().unwrap();
        assert_eq!(session.identity, jane());
        assert_eq!(session.marker, Marker::new("new"));
    }

    #[test]
    fn test_unrelated_keys_are_ignored() {
        let store = MemoryStore::new();
        let mut holder = SessionHolder::new(store.new_tab());
        store.set("theme", "dark").unwrap();
        assert!(!holder.sync());
    }

    #[test]
    fn test_site_data_cleared_out_of_band() {
        let store = MemoryStore::new();
        let mut holder = SessionHolder::new(store.new_tab());
        holder.save(john(), Marker::new("m")).unwrap();

        store.clear_all();
        assert!(holder.sync());
        assert_eq!(holder.current(), None);
    }

    #[test]
    fn test_subscribers_observe_transitions() {
        let holder = SessionHolder::new(MemoryStore::new());
        let mut rx = holder.subscribe();
        assert!(rx.borrow_and_update().is_none());

        holder.save(john(), Marker::new("m")).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().identity, john());

        holder.load();
        assert!(!rx.has_changed().unwrap());

        holder.clear().unwrap();
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_marker_debug_is_redacted() {
        let marker = Marker::new("demo-token-secret");
        assert!(!format!("{marker:?}").contains("secret"));
    }

    #[tokio::test]
    async fn test_run_follows_other_tabs() {
        let store = MemoryStore::new();
        let writer = SessionHolder::new(store.clone());
        let mut follower = SessionHolder::new(store.new_tab());
        let mut rx = follower.subscribe();

        let handle = tokio::spawn(async move {
            follower.run().await;
        });

        writer.save(jane(), Marker::new("m")).unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(2), async {
            loop {
                rx.changed().await.unwrap();
                if rx.borrow().is_some() {
                    break;
                }
            }
        })
        .await
        .unwrap();

        handle.abort();
    }
}
