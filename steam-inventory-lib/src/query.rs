//! Read-only queries over a scanned inventory.

use std::collections::HashMap;

use steam_inventory_core::AppRecord;

use crate::compat_tool::CompatTool;

/// Games assigned to one tool.
#[derive(Debug, Clone)]
pub struct ToolGames<'a, T> {
    pub tool: &'a T,
    pub games: Vec<AppRecord>,
}

/// Games using `tool`, or every game when `tool` is `None`.
///
/// A game matches when its pinned tool is `tool`, or when `tool` is an
/// anti-cheat runtime the game needs.
pub fn filter_by_tool(apps: &[AppRecord], tool: Option<&dyn CompatTool>) -> Vec<AppRecord> {
    apps.iter()
        .filter(|app| app.is_game())
        .filter(|app| match tool {
            None => true,
            Some(tool) => {
                app.compat_tool.as_deref() == Some(tool.internal_name()) || tool.is_runtime_for(app)
            }
        })
        .cloned()
        .collect()
}

/// Group games by pinned tool, matching internal names exactly.
///
/// Groups come back in the order of `tools`; tools without games are left
/// out. When two tools share an internal name, the later one gets the games.
pub fn group_by_tool<'a, T: CompatTool>(apps: &[AppRecord], tools: &'a [T]) -> Vec<ToolGames<'a, T>> {
    let by_name: HashMap<&str, usize> = tools
        .iter()
        .enumerate()
        .map(|(i, tool)| (tool.internal_name(), i))
        .collect();

    let mut groups: Vec<Vec<AppRecord>> = vec![Vec::new(); tools.len()];
    for app in apps.iter().filter(|app| app.is_game()) {
        let Some(&index) = app.compat_tool.as_deref().and_then(|name| by_name.get(name)) else {
            continue;
        };
        groups[index].push(app.clone());
    }

    tools
        .iter()
        .zip(groups)
        .filter(|(_, games)| !games.is_empty())
        .map(|(tool, games)| ToolGames { tool, games })
        .collect()
}
