//! Rebuild tabs from a persisted snapshot

use super::{SessionSnapshot, SnapshotTab, TAB_LIMIT};
use crate::pane::Section;
use crate::tab::{Tab, TabId, TabIdentity, TabRegistry, identity_of};

/// Tabs recovered from storage, ready for [`TabRegistry::load_tabs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredSession {
    pub tabs: Vec<Tab>,
    pub active_id: Option<TabId>,
}

impl RestoredSession {
    pub fn apply(self, registry: &mut TabRegistry) {
        registry.load_tabs(self.tabs, self.active_id);
    }
}

/// Re-attach pane and icon to a persisted tab.
///
/// The tab's key must name a known section, for document tabs as well as
/// section tabs. Anything else is dropped.
pub fn restore_tab(saved: &SnapshotTab) -> Option<Tab> {
    let identity = identity_of(&saved.id, &saved.key);
    let Some(section) = Section::from_key(&saved.key) else {
        log::debug!(
            "Session restore: dropping tab {} with unknown key '{}'",
            saved.id,
            saved.key
        );
        return None;
    };

    let mut tab = match identity {
        TabIdentity::Document { kind, doc_id } => Tab::document(&kind, &doc_id, saved.title.clone())?,
        TabIdentity::Section(_) => {
            let mut tab = Tab::for_section(section, saved.id.clone());
            tab.title = saved.title.clone();
            tab
        }
    };
    tab.closable = saved.closable && !tab.is_home();
    Some(tab)
}

/// Filter, cap and repair a snapshot's tabs.
///
/// At most [`TAB_LIMIT`] tabs come back, counting a reinserted home tab.
/// Returns `None` when nothing survives, so the caller keeps its default
/// state.
pub fn restore_session(snapshot: &SessionSnapshot) -> Option<RestoredSession> {
    let mut tabs: Vec<Tab> = snapshot
        .tabs
        .iter()
        .take(TAB_LIMIT)
        .filter_map(restore_tab)
        .collect();
    if tabs.is_empty() {
        return None;
    }

    if !tabs.iter().any(Tab::is_home) {
        tabs.insert(0, Tab::home());
        tabs.truncate(TAB_LIMIT);
    }

    // An active id that did not survive filtering falls back to the first tab
    let active_id = snapshot
        .active_id
        .clone()
        .filter(|id| tabs.iter().any(|t| &t.id == id));

    Some(RestoredSession { tabs, active_id })
}
