//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields so that partial config files keep working.

/// Application directory name under the user's config directory
pub const APP_DIR: &str = "carbono-verde";

pub fn persist_debounce_ms() -> u64 {
    250
}

pub fn api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Info
}
