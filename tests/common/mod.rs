//! Shared integration test helpers for carbono-verde.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::TestContext;
//! ```

#![allow(dead_code)]

use carbono_config::Config;
use carbono_verde::session::{FileStorage, SessionStore, Tenant};
use carbono_verde::workspace::WorkspaceSession;
use std::time::Duration;
use tempfile::TempDir;

/// Debounce long enough that only explicit flushes write in tests
pub const TEST_DEBOUNCE: Duration = Duration::from_secs(60);

/// Temp storage directory plus a config pointing at it.
///
/// The `TempDir` is removed when the context is dropped, so keep the
/// context alive until all storage I/O has completed.
pub struct TestContext {
    pub dir: TempDir,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = Config {
            storage_dir: Some(dir.path().join("storage")),
            ..Config::default()
        };
        Self { dir, config }
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.config.effective_storage_dir())
    }

    /// Session for `tenant`, restored from the context's file storage
    pub fn session(&self, tenant: &str) -> WorkspaceSession<FileStorage> {
        WorkspaceSession::restore(
            SessionStore::new(self.storage(), Tenant::new(tenant)),
            TEST_DEBOUNCE,
        )
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
