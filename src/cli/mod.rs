//! Command-line interface for carbono-verde.
//!
//! Each tab subcommand restores the tenant's session from file storage,
//! applies one action, flushes and prints the resulting tab strip. `map`
//! renders a compensation GeoJSON file without touching the session.

use crate::compensation::FeatureCollection;
use crate::pane::Section;
use crate::session::Storage;
use crate::workspace::WorkspaceSession;
use anyhow::{Context, Result};
use carbono_config::Config;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// carbono-verde - Tabbed workspace shell for the Carbono Verde dashboard
#[derive(Parser, Debug)]
#[command(name = "carbono-verde")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Tenant whose tab snapshot is used (overrides config and storage slot)
    #[arg(long, value_name = "TENANT")]
    pub tenant: Option<String>,

    /// Directory holding storage slots (overrides config)
    #[arg(long, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Print the restored tab strip
    Show,

    /// Open or focus a sidebar section
    Open {
        /// Section key (home, operations, orders, ...)
        #[arg(value_parser = parse_section)]
        section: Section,
    },

    /// Open or focus a document tab
    Doc {
        kind: String,
        id: String,
        title: String,
    },

    /// Activate a tab by id
    Activate { id: String },

    /// Close a tab by id (the home tab is pinned)
    Close { id: String },

    /// Move a tab to an index in the strip
    Move { id: String, index: usize },

    /// Forget the saved strip for this tenant
    Reset,

    /// Summarize a compensation GeoJSON file
    Map { geojson: PathBuf },
}

fn parse_section(key: &str) -> Result<Section, String> {
    Section::from_key(key).ok_or_else(|| {
        let keys: Vec<&str> = Section::ALL.iter().map(|s| s.key()).collect();
        format!("unknown section '{}' (expected one of: {})", key, keys.join(", "))
    })
}

impl Cli {
    /// Apply CLI overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(tenant) = &self.tenant {
            config.tenant = Some(tenant.clone());
        }
        if let Some(dir) = &self.storage_dir {
            config.storage_dir = Some(dir.clone());
        }
    }

    pub fn log_level_override(&self) -> Option<log::LevelFilter> {
        self.log_level.map(LogLevelArg::to_level_filter)
    }
}

/// Parse process arguments
pub fn process_cli() -> Cli {
    Cli::parse()
}

/// Apply a tab command to the session.
///
/// Returns `false` for commands that left the strip unchanged. `Map` is
/// not a session command and is rejected.
pub fn apply_command<S: Storage>(
    session: &mut WorkspaceSession<S>,
    command: &Commands,
) -> Result<bool> {
    let changed = match command {
        Commands::Show => false,
        Commands::Open { section } => {
            let before = session.registry().clone();
            session.open_section(*section);
            *session.registry() != before
        }
        Commands::Doc { kind, id, title } => {
            let before = session.registry().clone();
            if session.open_document(kind, id, title).is_none() {
                anyhow::bail!("Invalid document '{}:{}'", kind, id);
            }
            *session.registry() != before
        }
        Commands::Activate { id } => {
            if !session.registry().contains(id) {
                anyhow::bail!("No tab with id '{}'", id);
            }
            let changed = session.registry().active_id() != Some(id.as_str());
            session.activate(id);
            changed
        }
        Commands::Close { id } => {
            if !session.registry().contains(id) {
                anyhow::bail!("No tab with id '{}'", id);
            }
            session.close_tab(id)
        }
        Commands::Move { id, index } => {
            if !session.registry().contains(id) {
                anyhow::bail!("No tab with id '{}'", id);
            }
            session.move_tab_to(id, *index)
        }
        Commands::Reset => {
            session.reset();
            true
        }
        Commands::Map { .. } => anyhow::bail!("'map' does not operate on a session"),
    };
    Ok(changed)
}

/// Print the tab strip, marking the active tab with `*`.
pub fn render_strip<S: Storage>(session: &WorkspaceSession<S>, out: &mut impl Write) -> Result<()> {
    writeln!(out, "tenant: {}", session.tenant())?;
    let active = session.registry().active_id();
    for (index, tab) in session.tabs().iter().enumerate() {
        let marker = if Some(tab.id.as_str()) == active { '*' } else { ' ' };
        let pin = if tab.closable { "" } else { " [pinned]" };
        writeln!(
            out,
            "{marker} {index}: {} ({}) {}{pin}",
            tab.title, tab.pane, tab.id
        )?;
    }
    Ok(())
}

/// Print one line per region of a compensation GeoJSON file.
pub fn render_map(path: &std::path::Path, out: &mut impl Write) -> Result<()> {
    let collection = FeatureCollection::load(path)?;
    for view in collection.views() {
        let anchor = match view.label_at {
            Some((lat, lng)) => format!("{lat:.4},{lng:.4}"),
            None => "-".to_string(),
        };
        writeln!(
            out,
            "{}\t{}%\t{}\t{}\t{}",
            view.name,
            view.carbon,
            view.tier.label(),
            view.style.fill_color,
            anchor
        )
        .context("Failed to write map summary")?;
    }
    Ok(())
}
