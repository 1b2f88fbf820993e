use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steam_inventory_lib::SteamPaths;
use steam_inventory_lib::settings;

use crate::error::CliError;

fn log_location(label: &str, path: &Path) {
    let status = if path.exists() { "(exists)" } else { "(not found)" };
    log::info!(
        "  {} {} {}",
        format!("{label}:").if_supports_color(Stdout, |t| t.cyan()),
        path.display(),
        if path.exists() {
            format!("{}", status.if_supports_color(Stdout, |t| t.green()))
        } else {
            format!("{}", status.if_supports_color(Stdout, |t| t.dimmed()))
        },
    );
}

/// Show the settings file and the locations it resolves to.
pub(crate) fn run_config_show(steam_config: Option<PathBuf>) {
    log::info!(
        "{}",
        "steam-inventory Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    let paths = SteamPaths::new(settings::resolve_steam_config_dir(steam_config));
    log_location("Settings file", &settings::settings_path());
    log_location("Steam config", paths.config_dir());
    log_location("Library folders", &paths.libraryfolders_vdf());
    log_location("Product info", &paths.appinfo_vdf());
    log_location("Tools dir", &paths.compat_tools_dir());
    match settings::resolve_anticheat_list() {
        Some(list) => log_location("Anti-cheat list", &list),
        None => log::info!(
            "  {} {}",
            "Anti-cheat list:".if_supports_color(Stdout, |t| t.cyan()),
            "not set".if_supports_color(Stdout, |t| t.yellow()),
        ),
    }

    if let Some(contents) = settings::load_settings_string() {
        log::info!("");
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

/// Save `path` as the Steam config directory.
pub(crate) fn run_config_set(path: &Path) -> Result<(), CliError> {
    let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !SteamPaths::new(&path).libraryfolders_vdf().exists() {
        log::warn!(
            "{} has no libraryfolders.vdf; saving anyway",
            path.display()
        );
    }
    settings::save_steam_config_dir(Some(&path))
        .map_err(|e| CliError::config(format!("could not save settings: {e}")))?;
    log::info!(
        "{} Steam config set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Remove the saved Steam config directory.
pub(crate) fn run_config_clear() -> Result<(), CliError> {
    settings::save_steam_config_dir(None)
        .map_err(|e| CliError::config(format!("could not save settings: {e}")))?;
    log::info!(
        "{} Saved Steam config cleared",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
