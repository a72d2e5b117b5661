//! Capture the live tab strip into a persistable snapshot

use super::{SNAPSHOT_VERSION, SessionSnapshot, SnapshotTab, TAB_LIMIT};
use crate::tab::{Tab, TabRegistry};

impl From<&Tab> for SnapshotTab {
    fn from(tab: &Tab) -> Self {
        Self {
            id: tab.id.clone(),
            key: tab.key.clone(),
            title: tab.title.clone(),
            closable: tab.closable,
        }
    }
}

/// Capture the registry with the current time
pub fn capture_session(registry: &TabRegistry) -> SessionSnapshot {
    capture_session_at(registry, chrono::Utc::now().timestamp_millis())
}

/// Capture the registry, stamping it with `ts` (epoch milliseconds)
pub fn capture_session_at(registry: &TabRegistry, ts: i64) -> SessionSnapshot {
    SessionSnapshot {
        v: SNAPSHOT_VERSION,
        ts,
        tabs: registry
            .tabs()
            .iter()
            .take(TAB_LIMIT)
            .map(SnapshotTab::from)
            .collect(),
        active_id: registry.active_id().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::Section;

    #[test]
    fn capture_caps_and_reduces_fields() {
        let mut reg = TabRegistry::new();
        for i in 0..14 {
            reg.add(Tab::for_section(Section::Clients, format!("clients-{i:05}")));
        }
        reg.activate("clients-00003");

        let snapshot = capture_session_at(&reg, 1_700_000_000_000);
        assert_eq!(snapshot.v, 1);
        assert_eq!(snapshot.ts, 1_700_000_000_000);
        assert_eq!(snapshot.tabs.len(), TAB_LIMIT);
        assert_eq!(snapshot.tabs[0].id, "home");
        assert!(!snapshot.tabs[0].closable);
        assert_eq!(snapshot.active_id.as_deref(), Some("clients-00003"));
    }

    #[test]
    fn wire_format_uses_short_names() {
        let snapshot = capture_session_at(&TabRegistry::new(), 42);
        let json: serde_json::Value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["v"], 1);
        assert_eq!(json["ts"], 42);
        assert_eq!(json["activeId"], "home");
        assert_eq!(
            json["tabs"][0],
            serde_json::json!({"id": "home", "key": "home", "title": "Home", "closable": false})
        );
        assert!(json["tabs"][0].get("icon").is_none());
        assert!(json["tabs"][0].get("pane").is_none());
    }
}
