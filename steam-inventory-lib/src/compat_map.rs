//! Per-app compatibility tool assignments from `config.vdf`.
//!
//! Steam stores the user's pinned tools under
//! `InstallConfigStore.Software.Valve.Steam.CompatToolMapping`, keyed by the
//! app ID as a string:
//!
//! ```text
//! "CompatToolMapping"
//! {
//!     "0"       { "name" "proton_experimental" "config" "" "priority" "75" }
//!     "1245620" { "name" "GE-Proton9-2"        "config" "" "priority" "250" }
//! }
//! ```

use std::collections::HashMap;

use steam_inventory_core::{KeyValues, Value, text};

use crate::paths::SteamPaths;

/// Spellings of the vendor key under `Software`, in lookup order.
pub const VENDOR_KEYS: &[&str] = &["Valve", "valve"];

/// App ID Steam uses for the "all titles" default tool.
pub const GLOBAL_DEFAULT_APP_ID: &str = "0";

/// One entry of the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolAssignment {
    /// Internal name of the tool (e.g. `proton_experimental`).
    pub name: String,
    pub config: Option<String>,
    pub priority: Option<u32>,
}

/// Something noteworthy found while resolving the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMapDiagnostic {
    /// `Software` has neither a `Valve` nor a `valve` key.
    MissingVendorKey,
    /// The mapping is absent or empty (normal on a fresh install).
    EmptyMapping,
}

/// App ID string to pinned tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatToolMap {
    entries: HashMap<String, ToolAssignment>,
}

impl CompatToolMap {
    /// Build from the `CompatToolMapping` block. Entries without a `name`
    /// string are ignored.
    pub fn from_keyvalues(mapping: &KeyValues) -> Self {
        let entries = mapping
            .iter()
            .filter_map(|(app_id, value)| {
                let entry = value.as_map()?;
                let name = entry.get_str("name")?;
                Some((
                    app_id.to_string(),
                    ToolAssignment {
                        name: name.to_string(),
                        config: entry.get_str("config").map(str::to_string),
                        priority: entry
                            .get("priority")
                            .and_then(Value::as_u64)
                            .and_then(|p| u32::try_from(p).ok()),
                    },
                ))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, app_id: &str) -> Option<&ToolAssignment> {
        self.entries.get(app_id)
    }

    /// Internal name of the tool pinned for `app_id`, if any.
    pub fn tool_name(&self, app_id: &str) -> Option<&str> {
        self.get(app_id).map(|a| a.name.as_str())
    }

    /// The tool Steam applies to every title without its own pin.
    pub fn global_default(&self) -> Option<&ToolAssignment> {
        self.get(GLOBAL_DEFAULT_APP_ID)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ToolAssignment)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The vendor block under `Software`. An empty block under a preferred
/// spelling falls through to the next one.
fn vendor_block(software: &KeyValues) -> Option<&KeyValues> {
    let (last, preferred) = VENDOR_KEYS.split_last()?;
    preferred
        .iter()
        .filter_map(|key| software.get_map(key))
        .find(|block| !block.is_empty())
        .or_else(|| software.get_map(last))
}

/// Extract the compat tool mapping from a parsed `config.vdf`.
///
/// Never fails: a missing vendor key or empty mapping yields an empty map
/// together with a diagnostic, which is also logged.
pub fn resolve_compat_tool_map(config: &KeyValues) -> (CompatToolMap, Option<ToolMapDiagnostic>) {
    let vendor = config
        .get_path(&["InstallConfigStore", "Software"])
        .and_then(Value::as_map)
        .and_then(vendor_block);

    let Some(vendor) = vendor else {
        log::error!(
            "config.vdf InstallConfigStore.Software contains neither \"Valve\" nor \"valve\"; \
             the file may be invalid"
        );
        return (
            CompatToolMap::default(),
            Some(ToolMapDiagnostic::MissingVendorKey),
        );
    };

    let map = vendor
        .get_path(&["Steam", "CompatToolMapping"])
        .and_then(Value::as_map)
        .map(CompatToolMap::from_keyvalues)
        .unwrap_or_default();

    if map.is_empty() {
        log::warn!("CompatToolMapping is empty");
        return (map, Some(ToolMapDiagnostic::EmptyMapping));
    }
    (map, None)
}

/// Load `config.vdf` for `paths` and resolve its mapping.
pub fn load_compat_tool_map(paths: &SteamPaths) -> CompatToolMap {
    let config = text::safe_load(&paths.config_vdf());
    resolve_compat_tool_map(&config).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(body: &str) -> KeyValues {
        text::parse(body).unwrap()
    }

    #[test]
    fn missing_vendor_key_is_reported() {
        for body in [
            r#""InstallConfigStore" { "Software" { "Other" { } } }"#,
            r#""InstallConfigStore" { }"#,
            "",
        ] {
            let (map, diag) = resolve_compat_tool_map(&config(body));
            assert!(map.is_empty());
            assert_eq!(diag, Some(ToolMapDiagnostic::MissingVendorKey), "body: {body}");
        }
    }

    #[test]
    fn empty_mapping_is_a_warning() {
        let (map, diag) = resolve_compat_tool_map(&config(
            r#""InstallConfigStore" { "Software" { "valve" { "Steam" { "CompatToolMapping" { } } } } }"#,
        ));
        assert!(map.is_empty());
        assert_eq!(diag, Some(ToolMapDiagnostic::EmptyMapping));
    }

    #[test]
    fn absent_mapping_under_vendor_is_a_warning() {
        let (_, diag) = resolve_compat_tool_map(&config(
            r#""InstallConfigStore" { "Software" { "Valve" { "Steam" { } } } }"#,
        ));
        assert_eq!(diag, Some(ToolMapDiagnostic::EmptyMapping));
    }

    #[test]
    fn upper_case_vendor_takes_priority() {
        let (map, diag) = resolve_compat_tool_map(&config(
            r#"
"InstallConfigStore"
{
    "Software"
    {
        "valve" { "Steam" { "CompatToolMapping" { "10" { "name" "lower" } } } }
        "Valve" { "Steam" { "CompatToolMapping" { "10" { "name" "upper" } } } }
    }
}"#,
        ));
        assert_eq!(diag, None);
        assert_eq!(map.tool_name("10"), Some("upper"));
    }

    #[test]
    fn empty_upper_case_vendor_falls_back() {
        let (map, diag) = resolve_compat_tool_map(&config(
            r#""InstallConfigStore" { "Software" { "Valve" { } "valve" { "Steam" { "CompatToolMapping" { "10" { "name" "x" } } } } } }"#,
        ));
        assert_eq!(diag, None);
        assert_eq!(map.tool_name("10"), Some("x"));

        let (map, diag) = resolve_compat_tool_map(&config(
            r#""InstallConfigStore" { "Software" { "Valve" { } } }"#,
        ));
        assert!(map.is_empty());
        assert_eq!(diag, Some(ToolMapDiagnostic::MissingVendorKey));
    }

    #[test]
    fn reads_assignments() {
        let (map, diag) = resolve_compat_tool_map(&config(
            r#"
"InstallConfigStore"
{
    "Software"
    {
        "valve"
        {
            "Steam"
            {
                "CompatToolMapping"
                {
                    "0" { "name" "proton_experimental" "config" "" "priority" "75" }
                    "1245620" { "name" "GE-Proton9-2" "config" "" "priority" "250" }
                    "999" { "config" "nameless" }
                }
            }
        }
    }
}"#,
        ));
        assert_eq!(diag, None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.tool_name("1245620"), Some("GE-Proton9-2"));
        assert_eq!(map.get("1245620").unwrap().priority, Some(250));
        assert_eq!(map.global_default().unwrap().name, "proton_experimental");
        assert!(map.get("999").is_none());
        assert!(map.tool_name("42").is_none());
    }
}
