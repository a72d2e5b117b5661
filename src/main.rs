use anyhow::{Context, Result};
use carbono_config::Config;
use carbono_verde::cli::{self, Commands};
use carbono_verde::session::FileStorage;
use carbono_verde::workspace::WorkspaceSession;

fn main() -> Result<()> {
    // Parse CLI first so --help/--version exit before logging starts
    let cli = cli::process_cli();
    let cli_level = cli.log_level_override();
    carbono_verde::debug::init_log_bridge(cli_level);

    log::info!("Starting carbono-verde {}", carbono_verde::VERSION);

    let mut config = Config::load().context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    carbono_verde::debug::set_config_level(
        config.log_level.to_level_filter(),
        cli_level.is_some(),
    );

    let mut stdout = std::io::stdout().lock();

    if let Commands::Map { geojson } = &cli.command {
        return cli::render_map(geojson, &mut stdout);
    }

    let storage_dir = config.effective_storage_dir();
    log::debug!("Using storage directory {}", storage_dir.display());
    let mut session = WorkspaceSession::from_config(FileStorage::new(storage_dir), &config);

    let changed = cli::apply_command(&mut session, &cli.command)?;
    if changed && !matches!(cli.command, Commands::Reset) && !session.flush() {
        eprintln!("carbono-verde: warning: tab strip could not be saved");
    }
    cli::render_strip(&session, &mut stdout)?;

    log::info!("Exiting carbono-verde");
    Ok(())
}
