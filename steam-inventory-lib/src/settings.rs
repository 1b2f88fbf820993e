//! Shared application settings (Steam config location, anti-cheat list).
//!
//! The settings file is `~/.config/steam-inventory/settings.toml`:
//!
//! ```toml
//! [steam]
//! config_dir = "/home/u/.steam/root/config"
//!
//! [anticheat]
//! game_list = "/home/u/.cache/steam-inventory/awacy_games.json"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::enrich::AntiCheatEnricher;
use crate::paths::{default_config_dir, expand_home};

/// Canonical path to the settings file: `~/.config/steam-inventory/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("steam-inventory").join("settings.toml")
}

/// Resolve the Steam config directory using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `steam.config_dir` in `settings.toml`
/// 3. `~/.steam/root/config`
pub fn resolve_steam_config_dir(cli_override: Option<PathBuf>) -> PathBuf {
    resolve_steam_config_dir_from(&settings_path(), cli_override)
}

fn resolve_steam_config_dir_from(settings: &Path, cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return expand_home(&p);
    }
    if let Some(p) = load_path(settings, "steam", "config_dir") {
        return p;
    }
    default_config_dir()
}

/// Location of the AreWeAntiCheatYet game list: saved `anticheat.game_list`,
/// else the default cache location.
pub fn resolve_anticheat_list() -> Option<PathBuf> {
    load_path(&settings_path(), "anticheat", "game_list").or_else(AntiCheatEnricher::default_path)
}

/// Read a non-empty path value from `[table] key` of the settings file.
fn load_path(settings: &Path, table: &str, key: &str) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let value = doc.get(table)?.get(key)?.as_str()?;
    if value.is_empty() {
        None
    } else {
        Some(expand_home(Path::new(value)))
    }
}

/// Save (or clear) the Steam config directory in `settings.toml`.
pub fn save_steam_config_dir(path: Option<&Path>) -> io::Result<()> {
    save_path(&settings_path(), "steam", "config_dir", path)
}

/// Surgical update of one `[table] key` entry, preserving everything else.
fn save_path(settings: &Path, table: &str, key: &str, path: Option<&Path>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let root = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let section = root
        .entry(table)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let section = section
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{table}] is not a table")))?;

    match path {
        Some(p) => {
            section.insert(
                key.to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            section.remove(key);
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = tmp.path().join("settings.toml");
        save_path(&settings, "steam", "config_dir", Some(Path::new("/saved"))).unwrap();
        assert_eq!(
            resolve_steam_config_dir_from(&settings, Some(PathBuf::from("/cli"))),
            PathBuf::from("/cli")
        );
    }

    #[test]
    fn saved_value_round_trips_and_preserves_other_tables() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = tmp.path().join("nested").join("settings.toml");
        std::fs::create_dir_all(settings.parent().unwrap()).unwrap();
        std::fs::write(&settings, "[anticheat]\ngame_list = \"/tmp/games.json\"\n").unwrap();

        save_path(&settings, "steam", "config_dir", Some(Path::new("/srv/steam/config"))).unwrap();
        assert_eq!(
            resolve_steam_config_dir_from(&settings, None),
            PathBuf::from("/srv/steam/config")
        );
        assert_eq!(
            load_path(&settings, "anticheat", "game_list"),
            Some(PathBuf::from("/tmp/games.json"))
        );
        assert!(!settings.with_extension("toml.tmp").exists());
    }

    #[test]
    fn cleared_value_falls_back_to_default() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = tmp.path().join("settings.toml");
        save_path(&settings, "steam", "config_dir", Some(Path::new("/x"))).unwrap();
        save_path(&settings, "steam", "config_dir", None).unwrap();
        assert_eq!(resolve_steam_config_dir_from(&settings, None), default_config_dir());
    }

    #[test]
    fn non_table_section_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = tmp.path().join("settings.toml");
        std::fs::write(&settings, "steam = \"oops\"\n").unwrap();
        assert!(save_path(&settings, "steam", "config_dir", Some(Path::new("/x"))).is_err());
    }
}
