//! Sidebar navigation model: grouped items that open section tabs.

use super::Section;

/// A clickable sidebar item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarItem {
    /// Navigation key passed to the tab resolver
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// Rendered with the destructive style
    pub danger: bool,
}

/// One row of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    Header(&'static str),
    Item(SidebarItem),
}

/// What clicking a sidebar key means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Open or focus the section's tab
    Open(Section),
    /// End the authenticated session
    Logout,
    /// Key has no configuration: ignored
    Ignore,
}

impl NavAction {
    pub fn for_key(key: &str) -> Self {
        if key == "logout" {
            return NavAction::Logout;
        }
        match Section::from_key(key) {
            Some(section) if section.in_sidebar() => NavAction::Open(section),
            _ => NavAction::Ignore,
        }
    }
}

const fn item(key: &'static str, label: &'static str, icon: &'static str) -> SidebarEntry {
    SidebarEntry::Item(SidebarItem {
        key,
        label,
        icon,
        danger: false,
    })
}

const ENTRIES: &[SidebarEntry] = &[
    SidebarEntry::Header("Main"),
    item("home", "Home", "house"),
    item("operations", "Gerenciar Empresas", "map"),
    item("orders", "Criar novo usuario", "clipboard-list"),
    item("technicians", "Technicians", "users"),
    item("clients", "Clients", "user-group"),
    SidebarEntry::Header("Analytics"),
    item("kpi", "KPI Detail", "chart-line"),
    SidebarEntry::Header("Admin"),
    item("audit", "Audit Logs", "clock-rotate-left"),
    item("settings", "Settings", "gear"),
    SidebarEntry::Header("Account"),
    SidebarEntry::Item(SidebarItem {
        key: "logout",
        label: "Logout",
        icon: "arrow-right-from-bracket",
        danger: true,
    }),
];

/// Sidebar rows in display order
pub fn sidebar_entries() -> &'static [SidebarEntry] {
    ENTRIES
}
