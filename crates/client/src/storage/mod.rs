//! Durable key/value storage with change notifications.
//!
//! Models a browser's per-origin storage. Several handles ("tabs") may point
//! at the same underlying store. Every write publishes a [`StorageEvent`]
//! tagged with the writing tab, so other tabs can re-read what changed.
//! Writers see their own events too and are expected to skip them.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::broadcast;

/// Capacity of the change-event channel per store.
pub(crate) const EVENT_CAPACITY: usize = 64;

/// Errors writing to a durable store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded.
    #[error("storage encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Identifies the handle that made a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(u64);

impl TabId {
    /// Allocate a process-unique tab ID.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// A change made to a durable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Changed key, or `None` when the whole store was cleared.
    pub key: Option<String>,
    /// Tab that made the change.
    pub origin: TabId,
}

impl StorageEvent {
    /// Whether this event can affect `key`.
    #[must_use]
    pub fn touches(&self, key: &str) -> bool {
        self.key.as_deref().is_none_or(|k| k == key)
    }
}

/// A durable, string-valued key/value store.
///
/// Reads never fail: an unreadable backing store reads as empty.
pub trait DurableStore: Send + Sync {
    /// The tab this handle writes as.
    fn tab(&self) -> TabId;

    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value and notify subscribers. Deleting an absent key is a
    /// no-op that still succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the change could not be persisted.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Receive change events from every tab, including this one.
    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_ids_are_unique() {
        let a = TabId::next();
        let b = TabId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_clear_event_touches_every_key() {
        let event = StorageEvent {
            key: None,
            origin: TabId::next(),
        };
        assert!(event.touches("authUser"));
        assert!(event.touches("theme"));

        let keyed = StorageEvent {
            key: Some("theme".to_owned()),
            origin: TabId::next(),
        };
        assert!(!keyed.touches("authUser"));
    }
}
