//! Key/value storage backends and tenant scoping.
//!
//! The workspace only needs string slots addressed by key, the same shape
//! as browser local storage. [`MemoryStorage`] backs tests and embedded
//! hosts; [`FileStorage`] keeps one file per key in a directory.

use crate::error::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Storage slot holding the tenant handle
pub const TENANT_SLOT: &str = "workspace_handle";

/// Tenant used when the slot is empty or unreadable
pub const DEFAULT_TENANT: &str = "default";

/// String slots addressed by key.
pub trait Storage {
    /// Read a slot. A missing slot is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Deleting a missing slot succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    /// Reject writes, as a full or disabled browser store would
    read_only: Mutex<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `(key, value)` pairs
    pub fn with_slots<'a>(slots: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        {
            let mut map = storage.slots.lock();
            for (key, value) in slots {
                map.insert(key.to_string(), value.to_string());
            }
        }
        storage
    }

    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.lock() = read_only;
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if *self.read_only.lock() {
            return Err(StorageError::Unavailable("storage is read-only".to_string()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.slots.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.slots.lock().remove(key);
        Ok(())
    }
}

/// One file per key under a directory.
///
/// Keys are escaped into file names, so any key string is accepted.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.slot", escape_key(key)))
    }
}

/// Percent-escape everything outside `[A-Za-z0-9_-]`.
fn escape_key(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::Io {
                key: key.to_string(),
                source,
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Atomic save: write to temp file then rename to prevent torn slots
        let path = self.slot_path(key);
        let temp_path = path.with_extension("slot.tmp");
        fs::write(&temp_path, value).map_err(io_err)?;
        fs::rename(&temp_path, &path).map_err(io_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|source| StorageError::Io {
                key: key.to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Per-workspace scope isolating persisted state on a shared device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tenant(String);

impl Tenant {
    /// A blank name selects the default tenant.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            Self::default()
        } else {
            Self(name)
        }
    }

    /// Read the tenant handle from its storage slot
    pub fn resolve(storage: &impl Storage) -> Self {
        match storage.get(TENANT_SLOT) {
            Ok(Some(handle)) => Self::new(handle),
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Failed to read tenant handle, using default: {}", e);
                Self::default()
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Slot holding this tenant's tab snapshot
    pub fn tabs_key(&self) -> String {
        format!("app:tabs:v1:{}", self.0)
    }
}

impl Default for Tenant {
    fn default() -> Self {
        Self(DEFAULT_TENANT.to_string())
    }
}

impl std::fmt::Display for Tenant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tenant_defaults_when_slot_absent_or_blank() {
        assert_eq!(Tenant::resolve(&MemoryStorage::new()).as_str(), "default");
        let blank = MemoryStorage::with_slots([(TENANT_SLOT, "  ")]);
        assert_eq!(Tenant::resolve(&blank).as_str(), "default");
    }

    #[test]
    fn tenant_scopes_the_tabs_key() {
        let storage = MemoryStorage::with_slots([(TENANT_SLOT, "joinville")]);
        let tenant = Tenant::resolve(&storage);
        assert_eq!(tenant.tabs_key(), "app:tabs:v1:joinville");
        assert_eq!(Tenant::default().tabs_key(), "app:tabs:v1:default");
    }

    #[test]
    fn read_only_memory_rejects_writes() {
        let storage = MemoryStorage::with_slots([("a", "1")]);
        storage.set_read_only(true);
        assert!(matches!(
            storage.set("a", "2"),
            Err(StorageError::Unavailable(_))
        ));
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn file_storage_roundtrip() {
        let temp = tempdir().unwrap();
        let storage = FileStorage::new(temp.path().join("slots"));

        assert_eq!(storage.get("app:tabs:v1:default").unwrap(), None);
        storage.set("app:tabs:v1:default", "{\"v\":1}").unwrap();
        assert_eq!(
            storage.get("app:tabs:v1:default").unwrap().as_deref(),
            Some("{\"v\":1}")
        );

        storage.remove("app:tabs:v1:default").unwrap();
        assert_eq!(storage.get("app:tabs:v1:default").unwrap(), None);
        storage.remove("app:tabs:v1:default").unwrap();
    }

    #[test]
    fn escaped_keys_do_not_collide() {
        let storage = FileStorage::new("/tmp/x");
        assert_ne!(storage.slot_path("a:b"), storage.slot_path("a_b"));
        assert_ne!(storage.slot_path("a/b"), storage.slot_path("a%2Fb"));
        assert_eq!(
            storage.slot_path("app:tabs:v1:default"),
            PathBuf::from("/tmp/x/app%3Atabs%3Av1%3Adefault.slot")
        );
    }
}
