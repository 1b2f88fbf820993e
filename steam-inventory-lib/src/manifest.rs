//! Install-state check for apps listed in a library folder.
//!
//! `libraryfolders.vdf` lists every app ID Steam associates with a folder,
//! including soundtracks and other content with no directory under
//! `steamapps/common`. An app only counts as installed when its
//! `appmanifest_<id>.acf` exists and names an install directory that is
//! actually present.

use std::path::{Path, PathBuf};

use steam_inventory_core::{Value, text};

/// What the scanner keeps from a manifest that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// `AppState.installdir`, relative to `steamapps/common`.
    pub install_dir: String,
    pub name: Option<String>,
    pub size_on_disk: Option<u64>,
}

/// `<steamapps>/appmanifest_<id>.acf`
pub fn manifest_path(steamapps: &Path, app_id: u32) -> PathBuf {
    steamapps.join(format!("appmanifest_{app_id}.acf"))
}

/// Check that `app_id` is installed under `steamapps`.
///
/// Returns `None` when the manifest is missing, unreadable, has no
/// `installdir`, or the install directory doesn't exist.
pub fn validate_manifest(steamapps: &Path, app_id: u32) -> Option<ManifestInfo> {
    let path = manifest_path(steamapps, app_id);
    if !path.is_file() {
        log::trace!("{app_id}: no manifest at {}", path.display());
        return None;
    }

    let manifest = text::safe_load(&path);
    let state = manifest.get_map("AppState")?;
    let install_dir = state.get_str("installdir").filter(|d| !d.is_empty())?;
    if !steamapps.join("common").join(install_dir).is_dir() {
        log::trace!("{app_id}: install dir \"{install_dir}\" not present");
        return None;
    }

    Some(ManifestInfo {
        install_dir: install_dir.to_string(),
        name: state.get_str("name").map(str::to_string),
        size_on_disk: state.get("SizeOnDisk").and_then(Value::as_u64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_manifest(steamapps: &Path, app_id: u32, body: &str) {
        fs::create_dir_all(steamapps).unwrap();
        fs::write(manifest_path(steamapps, app_id), body).unwrap();
    }

    #[test]
    fn manifest_path_convention() {
        assert_eq!(
            manifest_path(Path::new("/lib/steamapps"), 570),
            Path::new("/lib/steamapps/appmanifest_570.acf")
        );
    }

    #[test]
    fn installed_app_passes() {
        let tmp = tempfile::tempdir().unwrap();
        let steamapps = tmp.path().join("steamapps");
        write_manifest(
            &steamapps,
            620,
            r#""AppState" { "appid" "620" "name" "Portal 2" "installdir" "Portal 2" "SizeOnDisk" "12884901888" }"#,
        );
        fs::create_dir_all(steamapps.join("common").join("Portal 2")).unwrap();

        let info = validate_manifest(&steamapps, 620).unwrap();
        assert_eq!(info.install_dir, "Portal 2");
        assert_eq!(info.name.as_deref(), Some("Portal 2"));
        assert_eq!(info.size_on_disk, Some(12_884_901_888));
    }

    #[test]
    fn missing_manifest_is_excluded() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(validate_manifest(tmp.path(), 620).is_none());
    }

    #[test]
    fn missing_install_dir_is_excluded() {
        let tmp = tempfile::tempdir().unwrap();
        let steamapps = tmp.path().join("steamapps");
        write_manifest(
            &steamapps,
            1_000_010,
            r#""AppState" { "appid" "1000010" "name" "Game Soundtrack" "installdir" "Game Soundtrack" }"#,
        );
        assert!(validate_manifest(&steamapps, 1_000_010).is_none());
    }

    #[test]
    fn manifest_without_installdir_is_excluded() {
        let tmp = tempfile::tempdir().unwrap();
        let steamapps = tmp.path().join("steamapps");
        write_manifest(&steamapps, 7, r#""AppState" { "appid" "7" }"#);
        fs::create_dir_all(steamapps.join("common")).unwrap();
        assert!(validate_manifest(&steamapps, 7).is_none());
    }

    #[test]
    fn malformed_manifest_is_excluded() {
        let tmp = tempfile::tempdir().unwrap();
        let steamapps = tmp.path().join("steamapps");
        write_manifest(&steamapps, 8, "\"AppState\" { \"installdir\" ");
        fs::create_dir_all(steamapps.join("common")).unwrap();
        assert!(validate_manifest(&steamapps, 8).is_none());
    }
}
