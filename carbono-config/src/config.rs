//! Dashboard configuration: the [`Config`] struct, its defaults and
//! YAML persistence.
//!
//! The config file lives at `~/.config/carbono-verde/config.yaml`. Every
//! field has a serde default, so an empty or partial file is valid.

use crate::defaults;
use crate::error::ConfigError;
use crate::types::LogLevel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Tenant override. When unset the tenant is read from the
    /// `workspace_handle` storage slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    /// Directory backing the key/value storage. Defaults to
    /// [`Config::default_storage_dir`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Quiet period before a changed tab strip is written to storage
    #[serde(default = "defaults::persist_debounce_ms")]
    pub persist_debounce_ms: u64,

    /// Debug log verbosity
    #[serde(default = "defaults::log_level")]
    pub log_level: LogLevel,

    /// Base URL of the backend API. Request paths such as `/auth/login` are
    /// appended to it.
    #[serde(default = "defaults::api_base_url")]
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tenant: None,
            storage_dir: None,
            persist_debounce_ms: defaults::persist_debounce_ms(),
            log_level: defaults::log_level(),
            api_base_url: defaults::api_base_url(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// A missing or blank file yields `Config::default()`; a malformed file is
    /// an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;

        Ok(())
    }

    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tenant) = &self.tenant
            && tenant.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "tenant must not be blank".to_string(),
            ));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api_base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join(defaults::APP_DIR)
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join(defaults::APP_DIR)
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Default directory for the key/value storage backend
    pub fn default_storage_dir() -> PathBuf {
        Self::config_dir().join("storage")
    }

    /// Storage directory in effect: the configured one, or the default.
    pub fn effective_storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(Self::default_storage_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("missing.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "tenant: prefeitura\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tenant.as_deref(), Some("prefeitura"));
        assert_eq!(config.persist_debounce_ms, 250);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "tenant: [[[").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_blank_tenant_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "tenant: \"  \"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_save_creates_parent_and_roundtrips() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");
        let config = Config {
            tenant: Some("joinville".to_string()),
            persist_debounce_ms: 0,
            log_level: LogLevel::Debug,
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("yaml.tmp").exists());

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_effective_storage_dir_prefers_configured() {
        let config = Config {
            storage_dir: Some(PathBuf::from("/var/lib/carbono")),
            ..Config::default()
        };
        assert_eq!(
            config.effective_storage_dir(),
            PathBuf::from("/var/lib/carbono")
        );
        assert_eq!(
            Config::default().effective_storage_dir(),
            Config::default_storage_dir()
        );
    }
}
