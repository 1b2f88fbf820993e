use std::path::{Path, PathBuf};

use steam_inventory_core::VdfError;
use thiserror::Error;

/// Errors that abort a library or shortcut scan.
///
/// None of these reach callers of [`crate::Inventory`]; they are logged and
/// the records gathered before the failure are kept.
#[derive(Debug, Error)]
pub enum ScanError {
    /// libraryfolders.vdf is missing, unreadable, or has no `libraryfolders` section
    #[error("{} has no \"libraryfolders\" section", .0.display())]
    MissingLibraryFolders(PathBuf),

    /// A library folder entry that lists apps is unusable
    #[error("Library folder {folder_id}: {reason}")]
    MalformedLibraryFolder { folder_id: String, reason: String },

    /// An app key under a library folder is not a numeric app ID
    #[error("Library folder {folder_id}: invalid app ID \"{raw}\"")]
    InvalidAppId { folder_id: String, raw: String },

    /// A shortcut entry is missing required data
    #[error("Shortcut {shortcut_id} of user {user}: {reason}")]
    MalformedShortcut {
        user: String,
        shortcut_id: String,
        reason: String,
    },

    /// Filesystem error while walking a directory or reading a file
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A binary KeyValues file could not be decoded
    #[error("Could not decode {}: {source}", .path.display())]
    Decode { path: PathBuf, source: VdfError },
}

impl ScanError {
    pub fn malformed_folder(folder_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedLibraryFolder {
            folder_id: folder_id.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_app_id(folder_id: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::InvalidAppId {
            folder_id: folder_id.into(),
            raw: raw.into(),
        }
    }

    pub fn malformed_shortcut(
        user: impl Into<String>,
        shortcut_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedShortcut {
            user: user.into(),
            shortcut_id: shortcut_id.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn decode(path: &Path, source: VdfError) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            source,
        }
    }
}
