//! In-memory durable store shared between tabs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use super::{DurableStore, EVENT_CAPACITY, StorageError, StorageEvent, TabId};

struct Shared {
    values: RwLock<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
}

/// Process-local store standing in for one browser's storage.
///
/// `clone()` returns another handle for the same tab; [`MemoryStore::new_tab`]
/// returns a handle that writes as a different tab.
#[derive(Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
    tab: TabId,
}

impl MemoryStore {
    /// Create an empty store with one tab.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                values: RwLock::new(HashMap::new()),
                events,
            }),
            tab: TabId::next(),
        }
    }

    /// Open another tab on the same storage.
    #[must_use]
    pub fn new_tab(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            tab: TabId::next(),
        }
    }

    /// Wipe every key, as a user clearing site data would.
    pub fn clear_all(&self) {
        self.shared
            .values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
        self.publish(None);
    }

    fn publish(&self, key: Option<&str>) {
        // No subscribers is fine.
        let _ = self.shared.events.send(StorageEvent {
            key: key.map(str::to_owned),
            origin: self.tab,
        });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DurableStore for MemoryStore {
    fn tab(&self) -> TabId {
        self.tab
    }

    fn get(&self, key: &str) -> Option<String> {
        self.shared
            .values
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.shared
            .values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        self.publish(Some(key));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.shared
            .values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
        self.publish(Some(key));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.shared.events.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_share_values() {
        let first = MemoryStore::new();
        let second = first.new_tab();

        first.set("theme", "dark").unwrap();
        assert_eq!(second.get("theme").as_deref(), Some("dark"));

        second.remove("theme").unwrap();
        assert_eq!(first.get("theme"), None);
    }

    #[test]
    fn test_events_carry_origin_tab() {
        let first = MemoryStore::new();
        let second = first.new_tab();
        let mut events = second.subscribe();

        first.set("authUser", "{}").unwrap();
        let event = events.try_recv().unwrap();
        assert_eq!(event.key.as_deref(), Some("authUser"));
        assert_eq!(event.origin, first.tab());
        assert_ne!(event.origin, second.tab());
    }

    #[test]
    fn test_clear_all_emits_keyless_event() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        let mut events = store.subscribe();

        store.clear_all();
        assert_eq!(store.get("a"), None);
        assert_eq!(events.try_recv().unwrap().key, None);
    }

    #[test]
    fn test_removing_absent_key_succeeds() {
        let store = MemoryStore::new();
        assert!(store.remove("missing").is_ok());
    }
}
