use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steam_inventory_lib::{CompatTool, Inventory};

use super::{find_tool, log_app_rows, print_json};
use crate::cli_types::OutputArgs;
use crate::error::CliError;

pub(crate) fn run_games(
    inventory: &Inventory,
    tool: Option<String>,
    output: OutputArgs,
) -> Result<(), CliError> {
    let tool = tool.map(|name| find_tool(inventory, &name));
    let games = inventory.list_games(tool.as_ref().map(|t| t as &dyn CompatTool), true);
    if output.json {
        return print_json(&games);
    }

    match &tool {
        Some(tool) => log::info!(
            "{} {}: {}",
            "Games using".if_supports_color(Stdout, |t| t.bold()),
            tool.display_name.if_supports_color(Stdout, |t| t.cyan()),
            games.len(),
        ),
        None => log::info!(
            "{}: {}",
            "Games".if_supports_color(Stdout, |t| t.bold()),
            games.len()
        ),
    }
    log::info!("");
    log_app_rows(&games);
    Ok(())
}
