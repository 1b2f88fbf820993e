//! Native app scan over the library folders in `libraryfolders.vdf`.
//!
//! ```text
//! "libraryfolders"
//! {
//!     "0" { "path" "/home/u/.steam/steam"     "apps" { "228980" "1120215" } }
//!     "1" { "path" "/mnt/drive/SteamLibrary"  "apps" { "1245620" "52234021833" } }
//! }
//! ```

use std::path::{Path, PathBuf};

use steam_inventory_core::{AppRecord, KeyValues, text};

use crate::compat_map::CompatToolMap;
use crate::enrich::AppEnricher;
use crate::error::ScanError;
use crate::manifest::validate_manifest;
use crate::paths::SteamPaths;
use crate::scan::PartialScan;

/// Folder ID of the library inside the Steam installation itself.
pub const DEFAULT_LIBRARY_ID: &str = "0";

/// Directory a library folder's content is reported under.
///
/// The default library records the Steam root as its path, while the
/// record's content root is its `steamapps/common`; secondary libraries are
/// reported by their path unchanged.
pub fn content_root(folder_id: &str, path: &Path) -> PathBuf {
    if folder_id == DEFAULT_LIBRARY_ID {
        path.join("steamapps").join("common")
    } else {
        path.to_path_buf()
    }
}

/// Scan every library folder for installed apps, then run `enrichers` over
/// what was found.
///
/// A missing or malformed `libraryfolders.vdf` aborts the scan, as does any
/// malformed folder entry; records built up to that point are kept but not
/// enriched.
pub fn scan_library(
    paths: &SteamPaths,
    tool_map: &CompatToolMap,
    enrichers: &[Box<dyn AppEnricher>],
) -> PartialScan {
    let source = paths.libraryfolders_vdf();
    let folders = text::safe_load(&source);

    let mut apps = Vec::new();
    let outcome = walk_library_folders(&folders, &source, tool_map, &mut apps);

    if outcome.is_ok() {
        for enricher in enrichers {
            enricher.enrich(&mut apps);
        }
    }

    log::debug!("Library scan found {} installed apps", apps.len());
    PartialScan::from_walk(apps, outcome)
}

fn walk_library_folders(
    manifest: &KeyValues,
    source: &Path,
    tool_map: &CompatToolMap,
    apps: &mut Vec<AppRecord>,
) -> Result<(), ScanError> {
    let folders = manifest
        .get_map("libraryfolders")
        .ok_or_else(|| ScanError::MissingLibraryFolders(source.to_path_buf()))?;

    for (folder_id, entry) in folders.iter() {
        // Older files mix plain string keys (e.g. "contentstatsid") in with
        // the folder blocks.
        let Some(folder) = entry.as_map() else {
            continue;
        };
        let Some(folder_apps) = folder.get_map("apps") else {
            continue;
        };
        let library_path = folder
            .get_str("path")
            .map(Path::new)
            .ok_or_else(|| ScanError::malformed_folder(folder_id, "missing \"path\""))?;

        let steamapps = library_path.join("steamapps");
        let root = content_root(folder_id, library_path);

        for raw_id in folder_apps.keys() {
            let app_id: u32 = raw_id
                .parse()
                .map_err(|_| ScanError::invalid_app_id(folder_id, raw_id))?;

            let Some(manifest) = validate_manifest(&steamapps, app_id) else {
                continue;
            };

            let mut app = AppRecord::native(app_id);
            app.library_folder_id = Some(folder_id.to_string());
            app.library_folder_path = Some(root.clone());
            app.install_dir = Some(manifest.install_dir);
            app.game_name = manifest.name;
            app.size_on_disk = manifest.size_on_disk;
            app.compat_tool = tool_map.tool_name(raw_id).map(str::to_string);
            apps.push(app);
        }
    }
    Ok(())
}
