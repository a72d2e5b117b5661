//! Typed error variants for the carbono-config crate.
//!
//! `Config::load_from` and `Config::save_to` return `anyhow::Result` for
//! callers at the binary boundary; the underlying cause is always one of
//! these variants and can be recovered with `downcast_ref::<ConfigError>()`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error on config file {path:?}: {source}")]
    Io {
        /// File being read or written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    #[error("Config validation error: {0}")]
    Validation(String),
}
