//! File-backed durable store.
//!
//! All keys live in one JSON object at `<dir>/storage.json`. Every read
//! goes to disk, so values written by another process are visible on the
//! next read. Change events only reach handles in this process.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use super::{DurableStore, EVENT_CAPACITY, StorageError, StorageEvent, TabId};

const FILE_NAME: &str = "storage.json";

type Document = BTreeMap<String, String>;

struct Shared {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
    events: broadcast::Sender<StorageEvent>,
}

/// Durable store persisted to a profile directory.
#[derive(Clone)]
pub struct FileStore {
    shared: Arc<Shared>,
    tab: TabId,
}

impl FileStore {
    /// Open (or lazily create) the store in `dir`.
    ///
    /// The directory is created on first write, not here.
    #[must_use]
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                path: dir.as_ref().join(FILE_NAME),
                write_lock: Mutex::new(()),
                events,
            }),
            tab: TabId::next(),
        }
    }

    /// Open another tab on the same file.
    #[must_use]
    pub fn new_tab(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            tab: TabId::next(),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    fn read_document(&self) -> Document {
        match fs::read_to_string(&self.shared.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %self.shared.path.display(), error = %e, "Ignoring unreadable storage file");
                Document::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Document::new(),
            Err(e) => {
                tracing::warn!(path = %self.shared.path.display(), error = %e, "Failed to read storage file");
                Document::new()
            }
        }
    }

    fn write_document(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(dir) = self.shared.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.shared.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(document)?)?;
        fs::rename(&tmp, &self.shared.path)?;
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        change: impl FnOnce(&mut Document),
    ) -> Result<(), StorageError> {
        {
            let _guard = self
                .shared
                .write_lock
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let mut document = self.read_document();
            change(&mut document);
            self.write_document(&document)?;
        }

        let _ = self.shared.events.send(StorageEvent {
            key: Some(key.to_owned()),
            origin: self.tab,
        });
        Ok(())
    }
}

impl DurableStore for FileStore {
    fn tab(&self) -> TabId {
        self.tab
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read_document().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(key, |doc| {
            doc.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(key, |doc| {
            doc.remove(key);
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.shared.events.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            let path = std::env::temp_dir().join(format!("bookstore-store-{}", uuid::Uuid::new_v4()));
            Self(path)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new();
        FileStore::open(&dir.0).set("authToken", "demo-token-1").unwrap();

        let reopened = FileStore::open(&dir.0);
        assert_eq!(reopened.get("authToken").as_deref(), Some("demo-token-1"));
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new();
        let store = FileStore::open(&dir.0);
        assert_eq!(store.get("authUser"), None);
        assert!(!dir.0.exists());
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_is_replaced_on_write() {
        let dir = TempDir::new();
        fs::create_dir_all(&dir.0).unwrap();
        fs::write(dir.0.join(FILE_NAME), "{ not json").unwrap();

        let store = FileStore::open(&dir.0);
        assert_eq!(store.get("authUser"), None);

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_remove_and_events() {
        let dir = TempDir::new();
        let store = FileStore::open(&dir.0);
        let other = store.new_tab();
        let mut events = other.subscribe();

        store.set("authUser", "{}").unwrap();
        store.remove("authUser").unwrap();
        assert_eq!(other.get("authUser"), None);

        assert_eq!(events.try_recv().unwrap().origin, store.tab());
        assert_eq!(events.try_recv().unwrap().key.as_deref(), Some("authUser"));
    }
}
