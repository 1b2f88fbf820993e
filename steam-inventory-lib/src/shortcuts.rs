//! Non-Steam shortcut scan over `userdata/<user>/config/shortcuts.vdf`.

use std::path::{Path, PathBuf};

use steam_inventory_core::{AppRecord, ShortcutInfo, Value, binary};

use crate::compat_map::{CompatToolMap, load_compat_tool_map};
use crate::error::ScanError;
use crate::paths::SteamPaths;
use crate::scan::PartialScan;

/// Keys Steam has used for a shortcut's display name.
const NAME_KEYS: &[&str] = &["AppName", "appname"];

/// Convert the signed app ID stored in `shortcuts.vdf` to Steam's unsigned
/// ID (two's complement, so `-1` becomes `4294967295`).
pub fn normalize_shortcut_app_id(raw: i32) -> u32 {
    raw as u32
}

/// Scan each local user's shortcut store.
///
/// When `tool_map` is `None` the mapping is loaded from `config.vdf`. Users
/// without a shortcut file, or whose file has no `shortcuts` block, are
/// skipped; any other failure stops the walk and is returned alongside the
/// shortcuts built so far.
pub fn scan_shortcuts(paths: &SteamPaths, tool_map: Option<&CompatToolMap>) -> PartialScan {
    let loaded;
    let tool_map = match tool_map {
        Some(map) => map,
        None => {
            loaded = load_compat_tool_map(paths);
            &loaded
        }
    };

    let mut apps = Vec::new();
    let outcome = walk_users(&paths.userdata_dir(), tool_map, &mut apps);
    log::debug!("Shortcut scan found {} shortcuts", apps.len());
    PartialScan::from_walk(apps, outcome)
}

fn user_dirs(userdata: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(userdata)
        .map_err(|e| ScanError::io(userdata, e))?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn walk_users(
    userdata: &Path,
    tool_map: &CompatToolMap,
    apps: &mut Vec<AppRecord>,
) -> Result<(), ScanError> {
    for user_dir in user_dirs(userdata)? {
        let user = user_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let shortcuts_file = user_dir.join("config").join("shortcuts.vdf");
        if !shortcuts_file.exists() {
            log::trace!("User {user} has no shortcuts.vdf");
            continue;
        }

        let data = std::fs::read(&shortcuts_file).map_err(|e| ScanError::io(&shortcuts_file, e))?;
        let store = binary::decode(&data).map_err(|e| ScanError::decode(&shortcuts_file, e))?;
        let Some(shortcuts) = store.get_map("shortcuts") else {
            continue;
        };

        for (shortcut_id, entry) in shortcuts.iter() {
            apps.push(shortcut_record(&user, shortcut_id, entry, tool_map)?);
        }
    }
    Ok(())
}

fn shortcut_record(
    user: &str,
    shortcut_id: &str,
    entry: &Value,
    tool_map: &CompatToolMap,
) -> Result<AppRecord, ScanError> {
    let entry = entry
        .as_map()
        .ok_or_else(|| ScanError::malformed_shortcut(user, shortcut_id, "entry is not a map"))?;
    let raw_id = entry
        .get("appid")
        .and_then(Value::as_i32)
        .ok_or_else(|| ScanError::malformed_shortcut(user, shortcut_id, "missing appid"))?;
    let app_id = normalize_shortcut_app_id(raw_id);

    let field = |key: &str| entry.get_str(key).map(str::to_string);
    let mut app = AppRecord::shortcut(
        app_id,
        ShortcutInfo {
            shortcut_id: shortcut_id.to_string(),
            start_dir: field("StartDir"),
            exe: field("Exe"),
            icon: field("icon"),
            user: user.to_string(),
        },
    );
    app.game_name = entry
        .get_any(NAME_KEYS)
        .and_then(Value::as_str)
        .map(str::to_string);
    app.compat_tool = tool_map.tool_name(&app_id.to_string()).map(str::to_string);
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use steam_inventory_core::{AppType, KeyValues};

    #[test]
    fn negative_ids_wrap_to_unsigned() {
        assert_eq!(normalize_shortcut_app_id(-1), 4_294_967_295);
        assert_eq!(normalize_shortcut_app_id(i32::MIN), 2_147_483_648);
        assert_eq!(normalize_shortcut_app_id(100), 100);
        assert_eq!(normalize_shortcut_app_id(0), 0);
    }

    fn entry(pairs: Vec<(&str, Value)>) -> Value {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn builds_record_from_entry() {
        let mut mapping = KeyValues::new();
        mapping.insert(
            "4294967295",
            entry(vec![("name", Value::String("GE-Proton9-2".into()))]),
        );
        let tool_map = CompatToolMap::from_keyvalues(&mapping);

        let app = shortcut_record(
            "12345",
            "0",
            &entry(vec![
                ("appid", Value::Int32(-1)),
                ("appname", Value::String("Heroic".into())),
                ("Exe", Value::String("\"/usr/bin/heroic\"".into())),
                ("StartDir", Value::String("\"/usr/bin/\"".into())),
            ]),
            &tool_map,
        )
        .unwrap();

        assert_eq!(app.app_id, 4_294_967_295);
        assert_eq!(app.app_type, AppType::Game);
        assert_eq!(app.game_name.as_deref(), Some("Heroic"));
        assert_eq!(app.compat_tool.as_deref(), Some("GE-Proton9-2"));
        let info = app.shortcut.unwrap();
        assert_eq!(info.shortcut_id, "0");
        assert_eq!(info.user, "12345");
        assert_eq!(info.exe.as_deref(), Some("\"/usr/bin/heroic\""));
        assert_eq!(info.icon, None);
        assert!(app.anticheat_runtimes.is_none());
    }

    #[test]
    fn app_name_prefers_capitalized_key() {
        let app = shortcut_record(
            "1",
            "0",
            &entry(vec![
                ("appid", Value::Int32(5)),
                ("appname", Value::String("lower".into())),
                ("AppName", Value::String("Upper".into())),
            ]),
            &CompatToolMap::default(),
        )
        .unwrap();
        assert_eq!(app.game_name.as_deref(), Some("Upper"));
        assert_eq!(app.compat_tool, None);
    }

    #[test]
    fn missing_appid_is_an_error() {
        let err = shortcut_record(
            "1",
            "3",
            &entry(vec![("AppName", Value::String("x".into()))]),
            &CompatToolMap::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::MalformedShortcut { ref shortcut_id, .. } if shortcut_id == "3"));
    }
}
