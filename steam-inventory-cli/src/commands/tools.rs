use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steam_inventory_lib::Inventory;

pub(crate) fn run_tools(inventory: &Inventory) {
    let tools = inventory.installed_compat_tools();
    let dir = inventory.paths().compat_tools_dir();

    if tools.is_empty() {
        log::info!(
            "No compatibility tools installed in {}",
            dir.display().if_supports_color(Stdout, |t| t.cyan()),
        );
        return;
    }

    log::info!(
        "Compatibility tools in {}:",
        dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("");
    for tool in &tools {
        log::info!(
            "  {}{}",
            tool.internal_name.if_supports_color(Stdout, |t| t.bold()),
            match tool.runtime() {
                Some(rt) => {
                    let label = format!("({rt:?} runtime)");
                    format!(" {}", label.if_supports_color(Stdout, |t| t.green()))
                }
                None => String::new(),
            },
        );
        if tool.display_name != tool.internal_name {
            log::info!("    Name: {}", tool.display_name);
        }
        if let Some(path) = &tool.install_dir {
            log::info!("    Path: {}", path.display());
        }
    }
}
