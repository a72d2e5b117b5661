//! Configuration system for the Carbono Verde workspace shell.
//!
//! This crate provides configuration loading, saving, and default values
//! for the dashboard client. It includes:
//!
//! - The [`Config`] struct and its serde defaults
//! - XDG-style path resolution for the config file and storage directory
//! - Typed [`ConfigError`] variants for load/save failures

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
