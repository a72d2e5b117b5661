//! Tenant-scoped snapshot I/O
//!
//! Snapshots are stored as JSON under `app:tabs:v1:<tenant>`.

use super::capture::capture_session;
use super::restore::{RestoredSession, restore_session};
use super::{SNAPSHOT_VERSION, SessionSnapshot, Storage, Tenant};
use crate::error::SnapshotError;
use crate::tab::TabRegistry;

/// Reads and writes one tenant's tab snapshot.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    tenant: Tenant,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S, tenant: Tenant) -> Self {
        Self { storage, tenant }
    }

    /// Store whose tenant is read from the storage's tenant slot
    pub fn for_current_tenant(storage: S) -> Self {
        let tenant = Tenant::resolve(&storage);
        Self::new(storage, tenant)
    }

    pub fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the raw snapshot.
    ///
    /// Returns `None` if the slot is absent or blank; errors on unreadable
    /// storage, malformed JSON or an unknown version.
    pub fn load_snapshot(&self) -> Result<Option<SessionSnapshot>, SnapshotError> {
        let Some(raw) = self.storage.get(&self.tenant.tabs_key())? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let snapshot: SessionSnapshot = serde_json::from_str(&raw)?;
        if snapshot.v != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.v));
        }
        Ok(Some(snapshot))
    }

    /// Restore tabs for this tenant, or `None` to keep the default state.
    ///
    /// Failures are logged, never returned.
    pub fn restore(&self) -> Option<RestoredSession> {
        match self.load_snapshot() {
            Ok(Some(snapshot)) => {
                let restored = restore_session(&snapshot);
                match &restored {
                    Some(r) => log::info!(
                        "Restored {} tabs for tenant '{}'",
                        r.tabs.len(),
                        self.tenant
                    ),
                    None => log::info!(
                        "No restorable tabs for tenant '{}', using defaults",
                        self.tenant
                    ),
                }
                restored
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Tab restore failed for tenant '{}': {}", self.tenant, e);
                None
            }
        }
    }

    /// Write the registry's snapshot.
    pub fn save_snapshot(&self, registry: &TabRegistry) -> Result<(), SnapshotError> {
        let snapshot = capture_session(registry);
        let json = serde_json::to_string(&snapshot)?;
        self.storage.set(&self.tenant.tabs_key(), &json)?;
        log::debug!(
            "Saved {} tabs for tenant '{}'",
            snapshot.tabs.len(),
            self.tenant
        );
        Ok(())
    }

    /// Write the registry's snapshot, logging failures.
    ///
    /// Returns `true` on success.
    pub fn save(&self, registry: &TabRegistry) -> bool {
        match self.save_snapshot(registry) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Tab save failed for tenant '{}': {}", self.tenant, e);
                false
            }
        }
    }

    /// Remove this tenant's snapshot
    pub fn clear(&self) -> Result<(), SnapshotError> {
        self.storage.remove(&self.tenant.tabs_key())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::Section;
    use crate::session::{MemoryStorage, TAB_LIMIT};
    use crate::tab::Tab;

    fn store_with(raw: &str) -> SessionStore<MemoryStorage> {
        let storage = MemoryStorage::with_slots([("app:tabs:v1:default", raw)]);
        SessionStore::new(storage, Tenant::default())
    }

    #[test]
    fn absent_slot_restores_nothing() {
        let store = SessionStore::new(MemoryStorage::new(), Tenant::default());
        assert_eq!(store.load_snapshot().unwrap(), None);
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn malformed_json_is_swallowed() {
        let store = store_with("{not json");
        assert!(matches!(store.load_snapshot(), Err(SnapshotError::Json(_))));
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn unknown_version_is_swallowed() {
        let store = store_with(r#"{"v":2,"ts":0,"tabs":[{"id":"home","key":"home"}]}"#);
        assert!(matches!(
            store.load_snapshot(),
            Err(SnapshotError::UnsupportedVersion(2))
        ));
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn empty_tab_list_restores_nothing() {
        let store = store_with(r#"{"v":1,"ts":5,"tabs":[]}"#);
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn save_and_restore_roundtrip() {
        let store = SessionStore::new(MemoryStorage::new(), Tenant::new("prefeitura"));
        let mut reg = TabRegistry::new();
        reg.add(Tab::for_section(Section::Orders, "orders-aaaaa"));
        reg.add(Tab::document("orders", "7", "Order #7").unwrap());
        reg.add(Tab::for_section(Section::Settings, "settings-bbbbb"));
        reg.activate("orders:7");
        assert!(store.save(&reg));
        assert!(
            store
                .storage()
                .get("app:tabs:v1:prefeitura")
                .unwrap()
                .is_some()
        );

        let mut restored = TabRegistry::new();
        store.restore().unwrap().apply(&mut restored);
        assert_eq!(restored, reg);
    }

    #[test]
    fn roundtrip_is_capped() {
        let store = SessionStore::new(MemoryStorage::new(), Tenant::default());
        let mut reg = TabRegistry::new();
        for i in 0..15 {
            reg.add(Tab::for_section(Section::Clients, format!("clients-{i:05}")));
        }
        store.save(&reg);
        let restored = store.restore().unwrap();
        assert_eq!(restored.tabs.len(), TAB_LIMIT);
        assert_eq!(restored.tabs[..], reg.tabs()[..TAB_LIMIT]);
    }

    #[test]
    fn write_failure_is_swallowed() {
        let storage = MemoryStorage::new();
        storage.set_read_only(true);
        let store = SessionStore::new(storage, Tenant::default());
        assert!(!store.save(&TabRegistry::new()));
        assert!(matches!(
            store.save_snapshot(&TabRegistry::new()),
            Err(SnapshotError::Storage(_))
        ));
    }

    #[test]
    fn tenants_are_isolated() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let a = SessionStore::new(storage.clone(), Tenant::new("a"));
        let b = SessionStore::new(storage.clone(), Tenant::new("b"));
        let mut reg = TabRegistry::new();
        reg.add(Tab::for_section(Section::Kpi, "kpi-12345"));
        a.save(&reg);
        assert!(a.restore().is_some());
        assert_eq!(b.restore(), None);
        a.clear().unwrap();
        assert_eq!(a.restore(), None);
    }
}
