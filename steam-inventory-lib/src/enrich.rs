//! Post-scan enrichment of native app records.
//!
//! Enrichers run once over the full list of native records after the
//! library walk, in the order they were registered. They only add
//! information; a missing or unreadable data source leaves the records as
//! they were.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use steam_inventory_core::{AppRecord, AppType, RuntimeType, Value, VdfError, appinfo};

/// A transform applied in place to the native records of a scan.
pub trait AppEnricher: Send + Sync {
    fn enrich(&self, apps: &mut [AppRecord]);
}

/// Fills `game_name` and `app_type` from `appcache/appinfo.vdf`.
#[derive(Debug, Clone)]
pub struct AppInfoEnricher {
    appinfo_path: PathBuf,
}

impl AppInfoEnricher {
    pub fn new(appinfo_path: impl Into<PathBuf>) -> Self {
        Self {
            appinfo_path: appinfo_path.into(),
        }
    }
}

impl AppEnricher for AppInfoEnricher {
    fn enrich(&self, apps: &mut [AppRecord]) {
        let wanted: HashSet<u32> = apps.iter().map(|a| a.app_id).collect();
        if wanted.is_empty() {
            return;
        }

        let infos = match appinfo::load_apps(&self.appinfo_path, &wanted) {
            Ok(infos) => infos,
            Err(VdfError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No appinfo cache at {}", self.appinfo_path.display());
                return;
            }
            Err(e) => {
                log::warn!("Could not read {}: {e}", self.appinfo_path.display());
                return;
            }
        };

        for app in apps.iter_mut() {
            let Some(common) = infos
                .get(&app.app_id)
                .and_then(|info| info.get_path(&["appinfo", "common"]))
                .and_then(Value::as_map)
            else {
                continue;
            };
            if let Some(name) = common.get_str("name") {
                app.game_name = Some(name.to_string());
            }
            if let Some(kind) = common.get_str("type") {
                app.app_type = AppType::from_steam(kind);
            }
        }
    }
}

/// Anti-cheat names as they appear in the AreWeAntiCheatYet game list.
const AWACY_EAC: &str = "Easy Anti-Cheat";
const AWACY_BATTLEYE: &str = "BattlEye";

#[derive(Debug, Deserialize)]
struct AwacyGame {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, rename = "storeIds")]
    store_ids: AwacyStoreIds,
    #[serde(default)]
    anticheats: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AwacyStoreIds {
    #[serde(default)]
    steam: Option<String>,
}

/// Sets anti-cheat runtime flags from a local copy of the
/// AreWeAntiCheatYet game list (`games.json`).
#[derive(Debug, Clone)]
pub struct AntiCheatEnricher {
    list_path: PathBuf,
}

impl AntiCheatEnricher {
    pub fn new(list_path: impl Into<PathBuf>) -> Self {
        Self {
            list_path: list_path.into(),
        }
    }

    /// `<cache_dir>/steam-inventory/awacy_games.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("steam-inventory").join("awacy_games.json"))
    }

    fn load(path: &Path) -> Option<Vec<AwacyGame>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(games) => Some(games),
            Err(e) => {
                log::warn!("Could not parse {}: {e}", path.display());
                None
            }
        }
    }
}

impl AppEnricher for AntiCheatEnricher {
    fn enrich(&self, apps: &mut [AppRecord]) {
        let Some(games) = Self::load(&self.list_path) else {
            return;
        };
        let by_app_id: HashMap<u32, &AwacyGame> = games
            .iter()
            .filter_map(|g| {
                let id = g.store_ids.steam.as_deref()?.trim().parse().ok()?;
                Some((id, g))
            })
            .collect();

        for app in apps.iter_mut() {
            let Some(flags) = app.anticheat_runtimes.as_mut() else {
                continue;
            };
            let Some(game) = by_app_id.get(&app.app_id) else {
                continue;
            };
            let uses = |name: &str| game.anticheats.iter().any(|a| a == name);
            flags.set(RuntimeType::Eac, uses(AWACY_EAC));
            flags.set(RuntimeType::BattlEye, uses(AWACY_BATTLEYE));
            app.anticheat_status = game.status.clone();
        }
    }
}
