//! Tab model for the workspace shell
//!
//! This module provides the core tab infrastructure including:
//! - `Tab`: one open workspace view bound to a [`Pane`]
//! - `TabRegistry`: the ordered tab strip and the active-tab pointer
//! - `TabIdentity`: how a tab is deduplicated when opened again

mod manager;

pub use manager::{MAX_DENSITY, TabRegistry, array_move};

use crate::pane::{Pane, Section};

/// Opaque tab identifier, stable for the tab's lifetime
pub type TabId = String;

/// Id of the default, pinned home tab
pub const HOME_TAB_ID: &str = "home";

/// Key of the home section
pub const HOME_KEY: &str = "home";

/// Icon used by document tabs
const DOCUMENT_ICON: &str = "pi pi-file";

/// Document id of the documentation tab
pub const DOCS_MAIN_ID: &str = "main";

/// Length of the random suffix appended to section tab ids
const ID_SUFFIX_LEN: usize = 5;

/// One open workspace view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    /// Logical category used for sidebar deduplication
    pub key: String,
    pub title: String,
    pub icon: Option<String>,
    pub pane: Pane,
    pub closable: bool,
}

/// Deduplication identity of a tab.
///
/// Section tabs are singletons per key. Document tabs carry a composite
/// `<kind>:<doc_id>` id and are unique per document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TabIdentity {
    Section(String),
    Document { kind: String, doc_id: String },
}

impl Tab {
    /// The default pinned home tab
    pub fn home() -> Self {
        let cfg = Section::Home.config();
        Self {
            id: HOME_TAB_ID.to_string(),
            key: HOME_KEY.to_string(),
            title: cfg.title.to_string(),
            icon: cfg.icon.map(str::to_string),
            pane: cfg.pane,
            closable: false,
        }
    }

    /// Build a section tab with the given id
    pub fn for_section(section: Section, id: impl Into<TabId>) -> Self {
        let cfg = section.config();
        Self {
            id: id.into(),
            key: section.key().to_string(),
            title: cfg.title.to_string(),
            icon: cfg.icon.map(str::to_string),
            pane: cfg.pane,
            closable: cfg.closable,
        }
    }

    /// Build a document tab for `kind` / `doc_id`.
    ///
    /// `None` when either part is blank, since such an id would read back
    /// as a section tab. Documents of the docs section mount the docs pane.
    pub fn document(kind: &str, doc_id: &str, title: impl Into<String>) -> Option<Self> {
        let id = document_tab_id(kind, doc_id)?;
        let (pane, icon) = if kind == Section::Docs.key() {
            (Pane::Docs, None)
        } else {
            (Pane::Document, Some(DOCUMENT_ICON.to_string()))
        };
        Some(Self {
            id,
            key: kind.to_string(),
            title: title.into(),
            icon,
            pane,
            closable: true,
        })
    }

    /// The documentation tab opened from the help button
    pub fn docs() -> Self {
        Self {
            id: format!("{}:{}", Section::Docs.key(), DOCS_MAIN_ID),
            key: Section::Docs.key().to_string(),
            title: Section::Docs.config().title.to_string(),
            icon: None,
            pane: Pane::Docs,
            closable: true,
        }
    }

    pub fn is_home(&self) -> bool {
        self.key == HOME_KEY
    }

    pub fn identity(&self) -> TabIdentity {
        identity_of(&self.id, &self.key)
    }

    /// Sidebar section this tab represents, if it is a section tab
    pub fn section(&self) -> Option<Section> {
        match self.identity() {
            TabIdentity::Section(key) => Section::from_key(&key),
            TabIdentity::Document { .. } => None,
        }
    }
}

/// Classify an `(id, key)` pair.
pub fn identity_of(id: &str, key: &str) -> TabIdentity {
    match id.split_once(':') {
        Some((kind, doc_id)) if kind == key && !doc_id.is_empty() => TabIdentity::Document {
            kind: kind.to_string(),
            doc_id: doc_id.to_string(),
        },
        _ => TabIdentity::Section(key.to_string()),
    }
}

/// Composite id for a document tab; `None` if `kind` or `doc_id` is blank
pub fn document_tab_id(kind: &str, doc_id: &str) -> Option<TabId> {
    if kind.trim().is_empty() || doc_id.trim().is_empty() || kind.contains(':') {
        return None;
    }
    Some(format!("{kind}:{doc_id}"))
}

/// Fresh id for a section tab: the key plus a short random suffix
pub fn section_tab_id(section: Section) -> TabId {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", section.key(), &suffix[..ID_SUFFIX_LEN])
}
