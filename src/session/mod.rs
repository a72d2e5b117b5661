//! Tab session persistence
//!
//! The tab strip is written to a tenant-scoped storage slot on every change
//! (debounced) and restored on startup. Storage failures and unreadable
//! snapshots are logged and fall back to the default session; they never
//! reach the user.

pub mod backend;
pub mod capture;
pub mod restore;
pub mod scheduler;
pub mod storage;

pub use backend::{FileStorage, MemoryStorage, Storage, Tenant};
pub use restore::RestoredSession;
pub use scheduler::PersistScheduler;
pub use storage::SessionStore;

use serde::{Deserialize, Serialize};

/// Schema version written into every snapshot
pub const SNAPSHOT_VERSION: u32 = 1;

/// Maximum tabs kept on save and on restore
pub const TAB_LIMIT: usize = 10;

/// Versioned envelope stored under `app:tabs:v1:<tenant>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Schema version
    pub v: u32,
    /// Save time, epoch milliseconds
    #[serde(default)]
    pub ts: i64,
    /// Tabs in strip order, at most [`TAB_LIMIT`]
    #[serde(default)]
    pub tabs: Vec<SnapshotTab>,
    /// Id of the focused tab
    #[serde(
        rename = "activeId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub active_id: Option<String>,
}

/// Field-reduced tab: pane and icon are re-derived from `key` on restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTab {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub closable: bool,
}
