use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steam_inventory_lib::Inventory;

use super::{log_app_rows, print_json};
use crate::cli_types::OutputArgs;
use crate::error::CliError;

pub(crate) fn run_apps(
    inventory: &Inventory,
    include_shortcuts: bool,
    fresh: bool,
    output: OutputArgs,
) -> Result<(), CliError> {
    let apps = inventory.list_apps(!fresh, include_shortcuts);
    if output.json {
        return print_json(apps.as_slice());
    }

    let shortcuts = apps.iter().filter(|a| a.is_shortcut()).count();
    log::info!(
        "{} ({} installed, {} shortcuts)",
        "Steam apps".if_supports_color(Stdout, |t| t.bold()),
        apps.len() - shortcuts,
        shortcuts,
    );
    log::info!("");
    log_app_rows(&apps);
    Ok(())
}
