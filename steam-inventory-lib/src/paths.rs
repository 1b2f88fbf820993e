//! Locations of the Steam files the inventory reads.
//!
//! Everything is derived from the Steam *config* directory (the one holding
//! `config.vdf` and `libraryfolders.vdf`, e.g. `~/.steam/root/config`).

use std::path::{Component, Path, PathBuf};

/// Default Steam config directory on Linux.
pub fn default_config_dir() -> PathBuf {
    expand_home(Path::new("~/.steam/root/config"))
}

/// Replace a leading `~` with the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Resolve `<config_dir>/../<name>`, following symlinks when possible.
///
/// `~/.steam/root` is usually a symlink, so the lexical parent and the real
/// parent can differ.
fn sibling_of_config(config_dir: &Path, name: &str) -> PathBuf {
    let joined = config_dir.join("..").join(name);
    std::fs::canonicalize(&joined).unwrap_or_else(|_| match config_dir.parent() {
        Some(parent) => parent.join(name),
        None => joined,
    })
}

/// Paths under one Steam installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamPaths {
    config_dir: PathBuf,
}

impl SteamPaths {
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            config_dir: expand_home(config_dir.as_ref()),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn libraryfolders_vdf(&self) -> PathBuf {
        self.config_dir.join("libraryfolders.vdf")
    }

    pub fn config_vdf(&self) -> PathBuf {
        self.config_dir.join("config.vdf")
    }

    /// Steam root (parent of the config directory).
    pub fn steam_root(&self) -> PathBuf {
        let joined = self.config_dir.join("..");
        std::fs::canonicalize(&joined).unwrap_or_else(|_| match self.config_dir.parent() {
            Some(parent) => parent.to_path_buf(),
            None => joined,
        })
    }

    /// Per-user data directory, one subdirectory per local account.
    pub fn userdata_dir(&self) -> PathBuf {
        sibling_of_config(&self.config_dir, "userdata")
    }

    pub fn appinfo_vdf(&self) -> PathBuf {
        sibling_of_config(&self.config_dir, "appcache").join("appinfo.vdf")
    }

    /// Directory holding user-installed compatibility tools.
    pub fn compat_tools_dir(&self) -> PathBuf {
        sibling_of_config(&self.config_dir, "compatibilitytools.d")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        let plain = Path::new("/opt/steam/config");
        assert_eq!(expand_home(plain), plain);

        let odd = Path::new("/opt/~/config");
        assert_eq!(expand_home(odd), odd);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/.steam/root/config")),
                home.join(".steam/root/config")
            );
        }
    }

    #[test]
    fn derived_paths_without_real_directories() {
        let paths = SteamPaths::new("/nonexistent/steam/config");
        assert_eq!(
            paths.libraryfolders_vdf(),
            Path::new("/nonexistent/steam/config/libraryfolders.vdf")
        );
        assert_eq!(paths.steam_root(), Path::new("/nonexistent/steam"));
        assert_eq!(paths.userdata_dir(), Path::new("/nonexistent/steam/userdata"));
        assert_eq!(
            paths.appinfo_vdf(),
            Path::new("/nonexistent/steam/appcache/appinfo.vdf")
        );
    }

    #[test]
    fn derived_paths_follow_real_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("steam");
        std::fs::create_dir_all(root.join("config")).unwrap();
        std::fs::create_dir_all(root.join("userdata")).unwrap();

        let paths = SteamPaths::new(root.join("config"));
        let real_root = std::fs::canonicalize(&root).unwrap();
        assert_eq!(paths.steam_root(), real_root);
        assert_eq!(paths.userdata_dir(), real_root.join("userdata"));
    }
}
