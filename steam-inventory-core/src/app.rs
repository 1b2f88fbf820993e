use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

/// The kind of product an app ID refers to.
///
/// Native entries start out [`AppType::Unknown`]; product-info enrichment
/// fills in the real type. Shortcuts are always [`AppType::Game`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AppType {
    #[default]
    Unknown,
    Game,
    Tool,
    Application,
    /// Any other type string Steam reports (demo, dlc, music, config, ...).
    Other(String),
}

impl AppType {
    /// Parse Steam's `common.type` value (case-insensitive).
    pub fn from_steam(s: &str) -> Self {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "" => Self::Unknown,
            "game" => Self::Game,
            "tool" => Self::Tool,
            "application" => Self::Application,
            _ => Self::Other(lower),
        }
    }

    pub fn is_game(&self) -> bool {
        matches!(self, Self::Game)
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str(""),
            Self::Game => f.write_str("game"),
            Self::Tool => f.write_str("tool"),
            Self::Application => f.write_str("application"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

impl Serialize for AppType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Anti-cheat runtimes Steam can provide as a compatibility layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuntimeType {
    #[serde(rename = "EAC")]
    Eac,
    BattlEye,
}

impl RuntimeType {
    pub fn all() -> &'static [RuntimeType] {
        &[RuntimeType::Eac, RuntimeType::BattlEye]
    }

    /// Name of the Steam tool that provides this runtime.
    pub fn tool_display_name(&self) -> &'static str {
        match self {
            Self::Eac => "Proton EasyAntiCheat Runtime",
            Self::BattlEye => "Proton BattlEye Runtime",
        }
    }
}

/// Which anti-cheat runtimes an app needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AntiCheatRuntimes {
    #[serde(rename = "EAC")]
    pub eac: bool,
    #[serde(rename = "BattlEye")]
    pub battleye: bool,
}

impl AntiCheatRuntimes {
    pub fn get(&self, runtime: RuntimeType) -> bool {
        match runtime {
            RuntimeType::Eac => self.eac,
            RuntimeType::BattlEye => self.battleye,
        }
    }

    pub fn set(&mut self, runtime: RuntimeType, enabled: bool) {
        match runtime {
            RuntimeType::Eac => self.eac = enabled,
            RuntimeType::BattlEye => self.battleye = enabled,
        }
    }
}

/// Fields only present on non-Steam shortcuts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShortcutInfo {
    /// Key of the entry inside `shortcuts.vdf` (`"0"`, `"1"`, ...).
    pub shortcut_id: String,
    pub start_dir: Option<String>,
    pub exe: Option<String>,
    pub icon: Option<String>,
    /// Name of the `userdata` subdirectory the shortcut belongs to.
    pub user: String,
}

/// One entry in the app inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppRecord {
    pub app_id: u32,
    pub app_type: AppType,
    pub game_name: Option<String>,

    /// Directory name under `steamapps/common` (native only).
    pub install_dir: Option<String>,
    pub size_on_disk: Option<u64>,

    /// Library folder key from `libraryfolders.vdf` (native only).
    pub library_folder_id: Option<String>,
    /// Content root of the library folder (native only).
    pub library_folder_path: Option<PathBuf>,

    /// Internal name of the compatibility tool pinned for this app.
    pub compat_tool: Option<String>,

    /// `Some` for native entries, `None` for shortcuts.
    pub anticheat_runtimes: Option<AntiCheatRuntimes>,
    /// AreWeAntiCheatYet status (e.g. "Supported", "Broken").
    pub anticheat_status: Option<String>,

    pub shortcut: Option<ShortcutInfo>,
}

impl AppRecord {
    /// A native library entry with anti-cheat flags initialized to false.
    pub fn native(app_id: u32) -> Self {
        Self {
            app_id,
            anticheat_runtimes: Some(AntiCheatRuntimes::default()),
            ..Default::default()
        }
    }

    /// A non-Steam shortcut entry.
    pub fn shortcut(app_id: u32, info: ShortcutInfo) -> Self {
        Self {
            app_id,
            app_type: AppType::Game,
            shortcut: Some(info),
            ..Default::default()
        }
    }

    pub fn is_shortcut(&self) -> bool {
        self.shortcut.is_some()
    }

    pub fn is_game(&self) -> bool {
        self.app_type.is_game()
    }

    /// Whether this app needs the given anti-cheat runtime.
    pub fn needs_runtime(&self, runtime: RuntimeType) -> bool {
        self.anticheat_runtimes
            .map(|flags| flags.get(runtime))
            .unwrap_or(false)
    }

    /// Best available name for display.
    pub fn display_name(&self) -> String {
        match &self.game_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("App {}", self.app_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_type_from_steam() {
        assert_eq!(AppType::from_steam("Game"), AppType::Game);
        assert_eq!(AppType::from_steam("TOOL"), AppType::Tool);
        assert_eq!(AppType::from_steam("application"), AppType::Application);
        assert_eq!(AppType::from_steam(""), AppType::Unknown);
        assert_eq!(AppType::from_steam("DLC"), AppType::Other("dlc".into()));
    }

    #[test]
    fn native_records_start_with_flags_cleared() {
        let app = AppRecord::native(570);
        assert_eq!(app.app_type, AppType::Unknown);
        assert_eq!(app.anticheat_runtimes, Some(AntiCheatRuntimes::default()));
        assert!(!app.needs_runtime(RuntimeType::Eac));
        assert!(!app.is_shortcut());
    }

    #[test]
    fn shortcuts_are_games_without_flags() {
        let app = AppRecord::shortcut(1, ShortcutInfo::default());
        assert!(app.is_game());
        assert!(app.anticheat_runtimes.is_none());
        assert!(!app.needs_runtime(RuntimeType::BattlEye));
    }

    #[test]
    fn anticheat_flags_by_kind() {
        let mut flags = AntiCheatRuntimes::default();
        flags.set(RuntimeType::BattlEye, true);
        assert!(flags.get(RuntimeType::BattlEye));
        assert!(!flags.get(RuntimeType::Eac));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut app = AppRecord::native(10);
        assert_eq!(app.display_name(), "App 10");
        app.game_name = Some("Counter-Strike".into());
        assert_eq!(app.display_name(), "Counter-Strike");
    }
}
