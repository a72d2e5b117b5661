//! Tab registry: the ordered tab strip of a workspace session

use super::{HOME_TAB_ID, Tab, TabId, TabIdentity};
use crate::pane::Section;

/// Tightest tab-strip density level
pub const MAX_DENSITY: u8 = 3;

/// Owns the open tabs, the active-tab pointer and the strip density.
///
/// All operations are total. The strip is never left empty: closing the
/// last tab reinstates the pinned home tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRegistry {
    /// All tabs, in on-screen order
    tabs: Vec<Tab>,
    /// Currently active tab ID
    active_id: Option<TabId>,
    /// Tab strip compactness, 0 (loosest) to [`MAX_DENSITY`]
    density: u8,
}

impl TabRegistry {
    /// Registry holding only the home tab
    pub fn new() -> Self {
        Self {
            tabs: vec![Tab::home()],
            active_id: Some(HOME_TAB_ID.to_string()),
            density: 0,
        }
    }

    /// Append a tab unless one with the same id already exists.
    ///
    /// Returns `true` if the tab was inserted.
    pub fn add(&mut self, mut tab: Tab) -> bool {
        if self.contains(&tab.id) {
            log::debug!("Tab {} already open, add ignored", tab.id);
            return false;
        }
        if tab.is_home() {
            tab.closable = false;
        }
        log::debug!("Added tab {} (total: {})", tab.id, self.tabs.len() + 1);
        self.tabs.push(tab);
        true
    }

    /// Point the active tab at `id`. The id is not validated.
    pub fn activate(&mut self, id: &str) {
        self.active_id = Some(id.to_string());
        log::debug!("Activated tab {}", id);
    }

    /// Remove the tab with matching `id`.
    ///
    /// If it was active, focus moves to the tab now at its index, else the
    /// previous tab, else the first. Removing the last tab reinstates home.
    /// Returns `true` if a tab was removed.
    pub fn close(&mut self, id: &str) -> bool {
        let Some(idx) = self.tabs.iter().position(|t| t.id == id) else {
            return false;
        };

        let was_active = self.active_id.as_deref() == Some(id);
        self.tabs.remove(idx);
        log::debug!("Closed tab {} (index {})", id, idx);

        if self.tabs.is_empty() {
            self.tabs.push(Tab::home());
            self.active_id = Some(HOME_TAB_ID.to_string());
            return true;
        }

        if was_active {
            let next = self
                .tabs
                .get(idx)
                .or_else(|| idx.checked_sub(1).and_then(|i| self.tabs.get(i)))
                .unwrap_or(&self.tabs[0])
                .id
                .clone();
            self.active_id = Some(next);
        }
        true
    }

    /// Replace the tab order wholesale with a permutation of the current tabs
    pub fn reorder(&mut self, tabs: Vec<Tab>) {
        self.tabs = tabs;
    }

    /// Replace the density level. Range is the caller's responsibility.
    pub fn set_density(&mut self, level: u8) {
        self.density = level;
    }

    /// Bulk-replace the registry; an empty `tabs` is ignored.
    ///
    /// Without an `active_id` the first tab becomes active.
    pub fn load_tabs(&mut self, mut tabs: Vec<Tab>, active_id: Option<TabId>) {
        let Some(first) = tabs.first() else {
            return;
        };
        let active = active_id.unwrap_or_else(|| first.id.clone());
        for tab in tabs.iter_mut().filter(|t| t.is_home()) {
            tab.closable = false;
        }
        log::info!("Loaded {} tabs, active {}", tabs.len(), active);
        self.tabs = tabs;
        self.active_id = Some(active);
    }

    /// Switch to the next tab (wraps around)
    pub fn next_tab(&mut self) {
        if let Some(idx) = self.active_index() {
            let next = (idx + 1) % self.tabs.len();
            self.active_id = Some(self.tabs[next].id.clone());
        }
    }

    /// Switch to the previous tab (wraps around)
    pub fn prev_tab(&mut self) {
        if let Some(idx) = self.active_index() {
            let prev = if idx == 0 { self.tabs.len() - 1 } else { idx - 1 };
            self.active_id = Some(self.tabs[prev].id.clone());
        }
    }

    /// Move a tab left or right, wrapping at the ends.
    /// direction: -1 for left, 1 for right
    ///
    /// Returns the `(from, to)` indices when the tab moved.
    pub fn move_tab(&mut self, id: &str, direction: i32) -> Option<(usize, usize)> {
        let current = self.index_of(id)?;
        let last = self.tabs.len() - 1;
        let target = if direction < 0 {
            if current == 0 { last } else { current - 1 }
        } else if current >= last {
            0
        } else {
            current + 1
        };
        self.move_index(current, target)
    }

    /// Move a tab to a specific index, clamped to the strip.
    ///
    /// Returns the `(from, to)` indices when the tab moved.
    pub fn move_tab_to_index(&mut self, id: &str, target_index: usize) -> Option<(usize, usize)> {
        let current = self.index_of(id)?;
        let clamped = target_index.min(self.tabs.len().saturating_sub(1));
        self.move_index(current, clamped)
    }

    fn move_index(&mut self, from: usize, to: usize) -> Option<(usize, usize)> {
        if from == to {
            return None;
        }
        let reordered = array_move(&self.tabs, from, to);
        self.reorder(reordered);
        log::debug!("Moved tab from index {} to {}", from, to);
        Some((from, to))
    }

    /// Get a reference to the active tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Get the active tab ID
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Get index of active tab (0-based)
    pub fn active_index(&self) -> Option<usize> {
        self.active_id.as_deref().and_then(|id| self.index_of(id))
    }

    /// Section of the active tab, for sidebar highlighting
    pub fn active_section(&self) -> Option<Section> {
        self.active_tab().and_then(Tab::section)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tabs.iter().any(|t| t.id == id)
    }

    /// First tab with the given deduplication identity
    pub fn find_by_identity(&self, identity: &TabIdentity) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.identity() == identity)
    }

    /// Get all tabs as a slice
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_ids(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn density(&self) -> u8 {
        self.density
    }

    /// Get the number of tabs
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Move the element at `from` to `to`, preserving the relative order of
/// every other element. Out-of-range indices return an unchanged copy.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() || to >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to, item);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::Section;

    fn registry_with(sections: &[(Section, &str)]) -> TabRegistry {
        let mut reg = TabRegistry::new();
        for (section, id) in sections {
            reg.add(Tab::for_section(*section, *id));
        }
        reg
    }

    fn ids(reg: &TabRegistry) -> Vec<&str> {
        reg.tab_ids()
    }

    #[test]
    fn starts_with_pinned_home() {
        let reg = TabRegistry::new();
        assert_eq!(ids(&reg), vec!["home"]);
        assert_eq!(reg.active_id(), Some("home"));
        assert_eq!(reg.density(), 0);
        assert!(!reg.tabs()[0].closable);
    }

    #[test]
    fn add_is_idempotent_by_id() {
        let mut reg = registry_with(&[(Section::Orders, "orders-aaaaa")]);
        let before = reg.clone();
        let mut dup = Tab::for_section(Section::Clients, "orders-aaaaa");
        dup.title = "Different".to_string();
        assert!(!reg.add(dup));
        assert_eq!(reg, before);
    }

    #[test]
    fn add_forces_home_unclosable() {
        let mut reg = TabRegistry::new();
        reg.close("home");
        let mut home = Tab::for_section(Section::Home, "home-xyz12");
        home.closable = true;
        reg.add(home);
        assert!(reg.tabs().iter().filter(|t| t.is_home()).all(|t| !t.closable));
    }

    #[test]
    fn activate_does_not_validate() {
        let mut reg = TabRegistry::new();
        reg.activate("ghost");
        assert_eq!(reg.active_id(), Some("ghost"));
        assert!(reg.active_tab().is_none());
    }

    #[test]
    fn close_active_prefers_next_tab() {
        let mut reg = registry_with(&[
            (Section::Orders, "a"),
            (Section::Clients, "b"),
            (Section::Settings, "c"),
        ]);
        reg.activate("b");
        assert!(reg.close("b"));
        assert_eq!(ids(&reg), vec!["home", "a", "c"]);
        assert_eq!(reg.active_id(), Some("c"));
    }

    #[test]
    fn close_active_last_falls_back_to_previous() {
        let mut reg = registry_with(&[(Section::Orders, "a"), (Section::Clients, "b")]);
        reg.activate("b");
        reg.close("b");
        assert_eq!(reg.active_id(), Some("a"));
    }

    #[test]
    fn close_inactive_keeps_active() {
        let mut reg = registry_with(&[(Section::Orders, "a"), (Section::Clients, "b")]);
        reg.activate("b");
        reg.close("a");
        assert_eq!(reg.active_id(), Some("b"));
    }

    #[test]
    fn close_unknown_is_noop() {
        let mut reg = registry_with(&[(Section::Orders, "a")]);
        let before = reg.clone();
        assert!(!reg.close("zzz"));
        assert_eq!(reg, before);
    }

    #[test]
    fn closing_last_tab_reinstates_home() {
        let mut reg = TabRegistry::new();
        reg.close("home");
        assert_eq!(ids(&reg), vec!["home"]);
        assert_eq!(reg.active_id(), Some("home"));
        assert!(!reg.tabs()[0].closable);

        let mut reg = TabRegistry::new();
        reg.load_tabs(vec![Tab::for_section(Section::Orders, "a")], None);
        reg.close("a");
        assert_eq!(ids(&reg), vec!["home"]);
        assert_eq!(reg.active_id(), Some("home"));
    }

    #[test]
    fn close_never_empties_the_strip() {
        let mut reg = registry_with(&[
            (Section::Orders, "a"),
            (Section::Clients, "b"),
            (Section::Kpi, "c"),
        ]);
        for id in ["c", "home", "a", "b", "home", "home"] {
            reg.activate(id);
            reg.close(id);
            assert!(!reg.is_empty());
            assert!(reg.active_tab().is_some(), "active dangling after closing {id}");
        }
    }

    #[test]
    fn load_tabs_ignores_empty_and_defaults_active() {
        let mut reg = TabRegistry::new();
        reg.load_tabs(Vec::new(), Some("x".to_string()));
        assert_eq!(reg, TabRegistry::new());

        reg.load_tabs(
            vec![
                Tab::for_section(Section::Orders, "a"),
                Tab::for_section(Section::Clients, "b"),
            ],
            None,
        );
        assert_eq!(reg.active_id(), Some("a"));
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut reg = registry_with(&[(Section::Orders, "a"), (Section::Clients, "b")]);
        reg.activate("b");
        reg.next_tab();
        assert_eq!(reg.active_id(), Some("home"));
        reg.prev_tab();
        assert_eq!(reg.active_id(), Some("b"));
    }

    #[test]
    fn move_tab_wraps_at_edges() {
        let mut reg = registry_with(&[(Section::Orders, "a"), (Section::Clients, "b")]);
        assert_eq!(reg.move_tab("home", -1), Some((0, 2)));
        assert_eq!(ids(&reg), vec!["a", "b", "home"]);
        assert_eq!(reg.move_tab("home", 1), Some((2, 0)));
        assert_eq!(ids(&reg), vec!["home", "a", "b"]);
    }

    #[test]
    fn move_tab_to_index_clamps_and_skips_noop() {
        let mut reg = registry_with(&[(Section::Orders, "a"), (Section::Clients, "b")]);
        assert_eq!(reg.move_tab_to_index("home", 100), Some((0, 2)));
        assert_eq!(ids(&reg), vec!["a", "b", "home"]);
        assert_eq!(reg.move_tab_to_index("b", 1), None);
        assert_eq!(reg.move_tab_to_index("missing", 0), None);
    }

    #[test]
    fn array_move_preserves_membership() {
        let items = vec![1, 2, 3, 4, 5];
        for from in 0..items.len() {
            for to in 0..items.len() {
                let mut moved = array_move(&items, from, to);
                assert_eq!(moved[to], items[from]);
                moved.sort();
                assert_eq!(moved, items);
            }
        }
        assert_eq!(array_move(&items, 0, 9), items);
    }
}
