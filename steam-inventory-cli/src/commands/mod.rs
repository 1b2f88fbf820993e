pub(crate) mod apps;
pub(crate) mod config;
pub(crate) mod games;
pub(crate) mod group;
pub(crate) mod shortcuts;
pub(crate) mod tools;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use steam_inventory_lib::{AppRecord, BasicCompatTool, Inventory};

use crate::error::CliError;

/// JSON goes straight to stdout so `--quiet` never swallows it.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per app: ID, name, pinned tool, and where it lives.
pub(crate) fn log_app_rows(apps: &[AppRecord]) {
    for app in apps {
        let tool = match &app.compat_tool {
            Some(name) => format!("{}", name.if_supports_color(Stdout, |t| t.cyan())),
            None => format!("{}", "-".if_supports_color(Stdout, |t| t.dimmed())),
        };
        let location = match (&app.shortcut, &app.library_folder_id) {
            (Some(info), _) => format!("shortcut (user {})", info.user),
            (None, Some(folder)) => format!("library {folder}"),
            (None, None) => String::new(),
        };
        log::info!(
            "  {:>10}  {}  {}  {}",
            app.app_id.if_supports_color(Stdout, |t| t.dimmed()),
            app.display_name().if_supports_color(Stdout, |t| t.bold()),
            tool,
            location.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Look up a tool by internal name, preferring an installed definition so
/// runtime tools keep their display name.
pub(crate) fn find_tool(inventory: &Inventory, name: &str) -> BasicCompatTool {
    inventory
        .installed_compat_tools()
        .into_iter()
        .find(|tool| tool.internal_name == name)
        .unwrap_or_else(|| BasicCompatTool::named(name))
}
