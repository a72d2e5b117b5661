// Library exports for testing and potential library use
//
// State shared across threads (storage slots, the log file) uses
// `parking_lot::Mutex`. Density runs coordinate via an atomic generation
// counter instead of a lock.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod debug;

pub mod api;
pub mod auth;
pub mod cli;
pub mod compensation;
pub mod density;
pub mod error;
pub mod forms;
pub mod pane;
pub mod session;
pub mod tab;
pub mod tab_bar;
pub mod workspace;

pub use pane::{NavAction, Pane, Section};
pub use session::{FileStorage, MemoryStorage, SessionStore, Storage, Tenant};
pub use tab::{Tab, TabId, TabRegistry};
pub use workspace::WorkspaceSession;
