//! The inventory service: scans, cache, and queries behind one handle.

use std::path::Path;

use steam_inventory_core::AppRecord;

use crate::cache::{AppList, InventoryCache};
use crate::compat_map::{CompatToolMap, load_compat_tool_map};
use crate::compat_tool::{BasicCompatTool, CompatTool, discover_compat_tools};
use crate::enrich::{AntiCheatEnricher, AppEnricher, AppInfoEnricher};
use crate::library::scan_library;
use crate::paths::SteamPaths;
use crate::query::{ToolGames, filter_by_tool, group_by_tool};
use crate::settings::resolve_anticheat_list;
use crate::shortcuts::scan_shortcuts;

/// App inventory for one Steam installation.
pub struct Inventory {
    paths: SteamPaths,
    enrichers: Vec<Box<dyn AppEnricher>>,
    cache: InventoryCache,
}

impl Inventory {
    /// Inventory for the Steam config directory at `config_dir`
    /// (e.g. `~/.steam/root/config`), with the default enrichers:
    /// product info from `appinfo.vdf`, then anti-cheat flags from the
    /// AreWeAntiCheatYet list when one is configured.
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        let paths = SteamPaths::new(config_dir);
        let mut enrichers: Vec<Box<dyn AppEnricher>> =
            vec![Box::new(AppInfoEnricher::new(paths.appinfo_vdf()))];
        if let Some(list) = resolve_anticheat_list() {
            enrichers.push(Box::new(AntiCheatEnricher::new(list)));
        }
        Self {
            paths,
            enrichers,
            cache: InventoryCache::new(),
        }
    }

    /// Replace the enrichers run after each library scan.
    pub fn with_enrichers(mut self, enrichers: Vec<Box<dyn AppEnricher>>) -> Self {
        self.enrichers = enrichers;
        self
    }

    pub fn paths(&self) -> &SteamPaths {
        &self.paths
    }

    /// Pinned tools from `config.vdf`.
    pub fn compat_tool_map(&self) -> CompatToolMap {
        load_compat_tool_map(&self.paths)
    }

    /// All installed apps, followed by shortcuts unless `include_shortcuts`
    /// is false.
    ///
    /// With `cached`, a previous result is returned as-is (whatever its
    /// shortcut setting was). Otherwise the library is rescanned and the
    /// result replaces the cached one.
    pub fn list_apps(&self, cached: bool, include_shortcuts: bool) -> AppList {
        self.cache
            .get_or_scan(cached, || self.scan(include_shortcuts))
    }

    fn scan(&self, include_shortcuts: bool) -> Vec<AppRecord> {
        let tool_map = self.compat_tool_map();
        let native = scan_library(&self.paths, &tool_map, &self.enrichers);
        let mut apps = native.apps;
        if let Some(err) = native.aborted {
            log::error!("Could not get a list of all Steam apps: {err}");
            return apps;
        }
        if include_shortcuts {
            apps.extend(self.list_shortcuts(Some(&tool_map)));
        }
        apps
    }

    /// Non-Steam shortcuts of every local user. Not cached.
    pub fn list_shortcuts(&self, tool_map: Option<&CompatToolMap>) -> Vec<AppRecord> {
        let scan = scan_shortcuts(&self.paths, tool_map);
        if let Some(err) = &scan.aborted {
            log::error!("Could not get a list of Steam shortcut apps: {err}");
        }
        scan.apps
    }

    /// Games (including shortcuts) using `tool`, or all games.
    pub fn list_games(&self, tool: Option<&dyn CompatTool>, cached: bool) -> Vec<AppRecord> {
        filter_by_tool(&self.list_apps(cached, true), tool)
    }

    /// Games grouped by the tool pinned for them; tools without games are
    /// omitted.
    pub fn group_games_by_tool<'t, T: CompatTool>(
        &self,
        tools: &'t [T],
        cached: bool,
    ) -> Vec<ToolGames<'t, T>> {
        group_by_tool(&self.list_apps(cached, true), tools)
    }

    /// The cached inventory, if a scan has run since the last invalidation.
    pub fn cached_apps(&self) -> Option<AppList> {
        self.cache.peek()
    }

    /// Forget the cached inventory.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// Tools installed under `compatibilitytools.d`.
    pub fn installed_compat_tools(&self) -> Vec<BasicCompatTool> {
        discover_compat_tools(&self.paths.compat_tools_dir())
    }
}
