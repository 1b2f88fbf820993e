//! Inventory of a Steam library: installed apps and non-Steam shortcuts,
//! annotated with the compatibility tool pinned for each.

pub mod cache;
pub mod compat_map;
pub mod compat_tool;
pub mod enrich;
pub mod error;
pub mod inventory;
pub mod library;
pub mod manifest;
pub mod paths;
pub mod query;
pub mod scan;
pub mod settings;
pub mod shortcuts;

pub use cache::{AppList, InventoryCache};
pub use compat_map::{CompatToolMap, ToolAssignment, ToolMapDiagnostic, resolve_compat_tool_map};
pub use compat_tool::{BasicCompatTool, CompatTool};
pub use enrich::{AntiCheatEnricher, AppEnricher, AppInfoEnricher};
pub use error::ScanError;
pub use inventory::Inventory;
pub use paths::SteamPaths;
pub use query::ToolGames;
pub use scan::PartialScan;

// Re-export core types so frontends only need this crate
pub use steam_inventory_core::{
    AntiCheatRuntimes, AppRecord, AppType, KeyValues, RuntimeType, ShortcutInfo, Value, VdfError,
};
