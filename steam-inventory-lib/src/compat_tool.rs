//! Compatibility tools as seen by inventory queries.

use std::path::{Path, PathBuf};

use steam_inventory_core::{AppRecord, RuntimeType, Value, text};

/// A selectable compatibility tool.
pub trait CompatTool {
    /// Name Steam stores in `CompatToolMapping` (e.g. `GE-Proton9-2`).
    fn internal_name(&self) -> &str;

    /// Whether this tool is a runtime the app needs regardless of which
    /// tool is pinned for it (the EAC and BattlEye runtimes).
    fn is_runtime_for(&self, _app: &AppRecord) -> bool {
        false
    }
}

/// A compatibility tool identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasicCompatTool {
    pub internal_name: String,
    pub display_name: String,
    pub install_dir: Option<PathBuf>,
}

impl BasicCompatTool {
    pub fn new(internal_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            display_name: display_name.into(),
            install_dir: None,
        }
    }

    /// A tool known only by its internal name.
    pub fn named(internal_name: impl Into<String>) -> Self {
        let internal_name = internal_name.into();
        Self::new(internal_name.clone(), internal_name)
    }

    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }

    /// The anti-cheat runtime this tool provides, judged by its display name.
    pub fn runtime(&self) -> Option<RuntimeType> {
        RuntimeType::all()
            .iter()
            .copied()
            .find(|rt| self.display_name.contains(rt.tool_display_name()))
    }
}

impl CompatTool for BasicCompatTool {
    fn internal_name(&self) -> &str {
        &self.internal_name
    }

    fn is_runtime_for(&self, app: &AppRecord) -> bool {
        self.runtime().is_some_and(|rt| app.needs_runtime(rt))
    }
}

/// Find user-installed tools under `compatibilitytools.d`.
///
/// Each tool directory carries a `compatibilitytool.vdf`:
///
/// ```text
/// "compatibilitytools"
/// {
///     "compat_tools"
///     {
///         "GE-Proton9-2" { "install_path" "." "display_name" "GE-Proton9-2" }
///     }
/// }
/// ```
///
/// Directories without a readable manifest are skipped.
pub fn discover_compat_tools(tools_dir: &Path) -> Vec<BasicCompatTool> {
    let entries = match std::fs::read_dir(tools_dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut tools: Vec<BasicCompatTool> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .flat_map(|dir| read_tool_manifest(&dir))
        .collect();
    tools.sort_by(|a, b| a.internal_name.cmp(&b.internal_name));
    tools
}

fn read_tool_manifest(dir: &Path) -> Vec<BasicCompatTool> {
    let path = dir.join("compatibilitytool.vdf");
    let manifest = match text::load(&path) {
        Ok(m) => m,
        Err(e) => {
            log::debug!("Skipping {}: {e}", dir.display());
            return Vec::new();
        }
    };
    let Some(defs) = manifest
        .get_path(&["compatibilitytools", "compat_tools"])
        .and_then(Value::as_map)
    else {
        log::debug!("{} declares no compat_tools", path.display());
        return Vec::new();
    };

    defs.iter()
        .filter_map(|(name, def)| {
            let def = def.as_map()?;
            let display = def.get_str("display_name").unwrap_or(name);
            let install_dir = match def.get_str("install_path") {
                Some(".") | None => dir.to_path_buf(),
                Some(rel) => dir.join(rel),
            };
            Some(BasicCompatTool::new(name, display).with_install_dir(install_dir))
        })
        .collect()
}
