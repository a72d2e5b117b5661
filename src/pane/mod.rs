//! Pane identifiers and the section table that backs the sidebar.
//!
//! Panes are a closed set: a tab can only ever mount one of the [`Pane`]
//! variants. Sidebar sections are singletons described by [`Section`]; the
//! same table resolves a section's pane when a tab is opened from the
//! sidebar and when a persisted tab is restored.

mod sidebar;

pub use sidebar::{NavAction, SidebarEntry, SidebarItem, sidebar_entries};

use serde::{Deserialize, Serialize};

/// View rendered inside a tab's content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pane {
    /// Neighborhood carbon-compensation map
    Home,
    /// Company management
    Operations,
    /// User registration
    Orders,
    Technicians,
    Clients,
    Kpi,
    Audit,
    Settings,
    /// Help / documentation
    Docs,
    /// Ad-hoc document instance (multi-instance tabs)
    Document,
}

impl Pane {
    /// Symbolic pane identifier
    pub fn identifier(self) -> &'static str {
        match self {
            Pane::Home => "HomePane",
            Pane::Operations => "OperationsPane",
            Pane::Orders => "OrdersPane",
            Pane::Technicians => "TechniciansPane",
            Pane::Clients => "ClientsPane",
            Pane::Kpi => "KpiPane",
            Pane::Audit => "AuditPane",
            Pane::Settings => "SettingsPane",
            Pane::Docs => "DocsPane",
            Pane::Document => "DocPane",
        }
    }
}

impl std::fmt::Display for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Static configuration for a sidebar section tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionConfig {
    pub title: &'static str,
    pub icon: Option<&'static str>,
    pub pane: Pane,
    pub closable: bool,
}

/// Singleton workspace sections reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Operations,
    Orders,
    Technicians,
    Clients,
    Kpi,
    Audit,
    Settings,
    Docs,
}

impl Section {
    /// All sections in sidebar order
    pub const ALL: [Section; 9] = [
        Section::Home,
        Section::Operations,
        Section::Orders,
        Section::Technicians,
        Section::Clients,
        Section::Kpi,
        Section::Audit,
        Section::Settings,
        Section::Docs,
    ];

    /// Stable key used for deduplication and persistence
    pub fn key(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Operations => "operations",
            Section::Orders => "orders",
            Section::Technicians => "technicians",
            Section::Clients => "clients",
            Section::Kpi => "kpi",
            Section::Audit => "audit",
            Section::Settings => "settings",
            Section::Docs => "docs",
        }
    }

    /// Look up a section by key. Unknown keys are a lookup miss.
    pub fn from_key(key: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Whether the sidebar opens this section. Docs opens from the help
    /// button as the `docs:main` document instead.
    pub fn in_sidebar(self) -> bool {
        self != Section::Docs
    }

    pub fn config(self) -> SectionConfig {
        let (title, icon, pane) = match self {
            Section::Home => ("Home", Some("pi pi-home"), Pane::Home),
            Section::Operations => ("Gerenciar Empresas", Some("pi pi-home"), Pane::Operations),
            Section::Orders => ("Work Orders", Some("pi pi-clipboard"), Pane::Orders),
            Section::Technicians => ("Technicians", Some("pi pi-users"), Pane::Technicians),
            Section::Clients => ("Clients", Some("pi pi-users"), Pane::Clients),
            Section::Kpi => ("KPI Details", Some("pi pi-chart-line"), Pane::Kpi),
            Section::Audit => ("Audit Logs", Some("pi pi-history"), Pane::Audit),
            Section::Settings => ("Settings", Some("pi pi-cog"), Pane::Settings),
            Section::Docs => ("Documentation", None, Pane::Docs),
        };
        SectionConfig {
            title,
            icon,
            pane,
            closable: self != Section::Home,
        }
    }
}
