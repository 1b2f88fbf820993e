use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steam_inventory_lib::Inventory;

use super::print_json;
use crate::cli_types::OutputArgs;
use crate::error::CliError;

pub(crate) fn run_shortcuts(inventory: &Inventory, output: OutputArgs) -> Result<(), CliError> {
    let shortcuts = inventory.list_shortcuts(None);
    if output.json {
        return print_json(&shortcuts);
    }

    if shortcuts.is_empty() {
        log::info!("No non-Steam shortcuts found.");
        return Ok(());
    }

    let mut current_user = "";
    for app in &shortcuts {
        let Some(info) = &app.shortcut else {
            continue;
        };
        if info.user != current_user {
            if !current_user.is_empty() {
                log::info!("");
            }
            current_user = &info.user;
            log::info!(
                "{} {}:",
                "User".if_supports_color(Stdout, |t| t.bold()),
                current_user.if_supports_color(Stdout, |t| t.bold()),
            );
        }

        log::info!(
            "  {} [{}]{}",
            app.display_name().if_supports_color(Stdout, |t| t.bold()),
            app.app_id.if_supports_color(Stdout, |t| t.dimmed()),
            match &app.compat_tool {
                Some(tool) => format!(" {}", tool.if_supports_color(Stdout, |t| t.cyan())),
                None => String::new(),
            },
        );
        if let Some(exe) = &info.exe {
            log::info!("    Exe: {exe}");
        }
        if let Some(dir) = &info.start_dir {
            log::info!("    Start in: {dir}");
        }
    }
    Ok(())
}
