//! File-backed slot store: one file per slot under a root directory.
//!
//! The durable stand-in for origin-scoped browser storage. Slot keys become
//! file names directly, so keys are restricted to a filename-safe alphabet;
//! anything else is rejected before touching the filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::traits::SlotStore;

/// A slot store persisting each slot to `<root>/<key>`.
#[derive(Debug)]
pub struct FileSlotStore {
    root: PathBuf,
}

impl FileSlotStore {
    /// Open (or create) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The root directory backing this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> StoreResult<PathBuf> {
        validate_slot_key(key)?;
        Ok(self.root.join(key))
    }
}

/// Keys must be usable as plain file names: non-empty, no path separators,
/// limited to `[A-Za-z0-9._-]`, and not starting with a dot.
fn validate_slot_key(key: &str) -> StoreResult<()> {
    let reject = |reason: &str| {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        })
    };

    if key.is_empty() {
        return reject("empty key");
    }
    if key.starts_with('.') {
        return reject("key starts with a dot");
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return reject("key contains characters outside [A-Za-z0-9._-]");
    }
    Ok(())
}

impl SlotStore for FileSlotStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.slot_path(key)?;
        fs::write(&path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    keys.push(name.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileSlotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::open(dir.path().join("slots")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_root_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("slots");
        let store = FileSlotStore::open(&root).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn set_get_roundtrip() {
        let (_dir, store) = temp_store();
        store.set("lumina_collections", "compressed-blob").unwrap();
        assert_eq!(
            store.get("lumina_collections").unwrap().as_deref(),
            Some("compressed-blob")
        );
    }

    #[test]
    fn get_missing_returns_none() {
        let (_dir, store) = temp_store();
        assert!(store.get("lumina_items").unwrap().is_none());
    }

    #[test]
    fn set_replaces_previous_value() {
        let (_dir, store) = temp_store();
        store.set("k", "old").unwrap();
        store.set("k", "new").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn remove_present_and_missing() {
        let (_dir, store) = temp_store();
        store.set("tracker_theme", "\"dark\"").unwrap();
        assert!(store.remove("tracker_theme").unwrap());
        assert!(!store.remove("tracker_theme").unwrap());
    }

    #[test]
    fn keys_lists_sorted_file_names() {
        let (_dir, store) = temp_store();
        store.set("lumina_items", "[]").unwrap();
        store.set("lumina_collections", "[]").unwrap();
        assert_eq!(
            store.keys().unwrap(),
            vec!["lumina_collections", "lumina_items"]
        );
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("slots");
        {
            let store = FileSlotStore::open(&root).unwrap();
            store.set("lumina_items", "persisted").unwrap();
        }
        let store = FileSlotStore::open(&root).unwrap();
        assert_eq!(
            store.get("lumina_items").unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn rejects_path_traversal_keys() {
        let (_dir, store) = temp_store();
        for bad in ["", "../escape", "a/b", ".hidden", "sl\\ash"] {
            let err = store.set(bad, "v").unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey { .. }), "key {bad:?}");
        }
    }
}
