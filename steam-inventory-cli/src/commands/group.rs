use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use steam_inventory_lib::{AppRecord, BasicCompatTool, Inventory};

use super::{find_tool, log_app_rows, print_json};
use crate::cli_types::OutputArgs;
use crate::error::CliError;

#[derive(Serialize)]
struct GroupJson<'a> {
    tool: &'a str,
    games: &'a [AppRecord],
}

/// Installed tools, then any other tool named in the mapping (Valve's own
/// Proton builds live outside `compatibilitytools.d`).
fn default_tools(inventory: &Inventory) -> Vec<BasicCompatTool> {
    let mut tools = inventory.installed_compat_tools();
    let map = inventory.compat_tool_map();
    let mut mapped: Vec<&str> = map
        .iter()
        .map(|(_, assignment)| assignment.name.as_str())
        .filter(|name| !name.is_empty())
        .collect();
    mapped.sort_unstable();
    mapped.dedup();

    for name in mapped {
        if !tools.iter().any(|t| t.internal_name == name) {
            tools.push(BasicCompatTool::named(name));
        }
    }
    tools
}

pub(crate) fn run_group(
    inventory: &Inventory,
    names: Option<Vec<String>>,
    output: OutputArgs,
) -> Result<(), CliError> {
    let tools: Vec<BasicCompatTool> = match names {
        Some(names) => names.iter().map(|n| find_tool(inventory, n)).collect(),
        None => default_tools(inventory),
    };
    let groups = inventory.group_games_by_tool(&tools, true);

    if output.json {
        let json: Vec<GroupJson<'_>> = groups
            .iter()
            .map(|g| GroupJson {
                tool: &g.tool.internal_name,
                games: &g.games,
            })
            .collect();
        return print_json(&json);
    }

    if groups.is_empty() {
        log::info!("No games are pinned to any of {} tools.", tools.len());
        return Ok(());
    }

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            log::info!("");
        }
        log::info!(
            "{} {} ({} games)",
            group.tool.internal_name.if_supports_color(Stdout, |t| t.bold()),
            if group.tool.display_name != group.tool.internal_name {
                format!(
                    "{}",
                    group.tool.display_name.if_supports_color(Stdout, |t| t.dimmed())
                )
            } else {
                String::new()
            },
            group.games.len(),
        );
        log_app_rows(&group.games);
    }
    Ok(())
}
