//! steam-inventory CLI
//!
//! Command-line interface for listing installed Steam games, non-Steam
//! shortcuts, and the compatibility tools pinned for them.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use steam_inventory_lib::Inventory;
use steam_inventory_lib::settings::resolve_steam_config_dir;

use cli_types::{Cli, Commands, ConfigAction};
use commands::apps::run_apps;
use commands::config::{run_config_clear, run_config_path, run_config_set, run_config_show};
use commands::games::run_games;
use commands::group::run_group;
use commands::shortcuts::run_shortcuts;
use commands::tools::run_tools;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let inventory = || {
        let config_dir = resolve_steam_config_dir(cli.steam_config.clone());
        log::debug!("Using Steam config at {}", config_dir.display());
        Inventory::new(config_dir)
    };

    match cli.command {
        Commands::Apps {
            no_shortcuts,
            fresh,
            output,
        } => run_apps(&inventory(), !no_shortcuts, fresh, output),
        Commands::Shortcuts { output } => run_shortcuts(&inventory(), output),
        Commands::Games { tool, output } => run_games(&inventory(), tool, output),
        Commands::Group { tools, output } => run_group(&inventory(), tools, output),
        Commands::Tools => {
            run_tools(&inventory());
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                run_config_show(cli.steam_config.clone());
                Ok(())
            }
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
            ConfigAction::Set { path } => run_config_set(&path),
            ConfigAction::Clear => run_config_clear(),
        },
    }
}
