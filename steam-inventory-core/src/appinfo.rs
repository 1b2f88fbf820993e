//! Reader for Steam's `appcache/appinfo.vdf` product-info cache.
//!
//! The file holds one binary KeyValues blob per app the client knows about,
//! which easily runs to tens of thousands of entries. Only the app IDs the
//! caller asks for are decoded; every other entry is skipped by its length
//! prefix.
//!
//! Layout:
//! - `u32` magic (version), `u32` universe
//! - v29 only: `i64` offset of the key string table
//! - entries until an app ID of 0:
//!   `u32` app ID, `u32` size, then `size` bytes of
//!   `u32` info state, `u32` last updated, `u64` access token,
//!   `[u8; 20]` text SHA-1, `u32` change number,
//!   `[u8; 20]` binary SHA-1 (v28+), binary KeyValues

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::binary::{self, ByteReader, KeyMode};
use crate::error::VdfError;
use crate::keyvalues::KeyValues;

const MAGIC_V27: u32 = 0x0756_4427;
const MAGIC_V28: u32 = 0x0756_4428;
const MAGIC_V29: u32 = 0x0756_4429;

/// Bytes between the size field and the KeyValues blob.
const ENTRY_HEADER_V27: usize = 4 + 4 + 8 + 20 + 4;
const ENTRY_HEADER_V28: usize = ENTRY_HEADER_V27 + 20;

/// appinfo.vdf format revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInfoVersion {
    V27,
    V28,
    V29,
}

impl AppInfoVersion {
    pub fn from_magic(magic: u32) -> Result<Self, VdfError> {
        match magic {
            MAGIC_V27 => Ok(Self::V27),
            MAGIC_V28 => Ok(Self::V28),
            MAGIC_V29 => Ok(Self::V29),
            other => Err(VdfError::InvalidMagic(other)),
        }
    }

    fn entry_header_len(self) -> usize {
        match self {
            Self::V27 => ENTRY_HEADER_V27,
            Self::V28 | Self::V29 => ENTRY_HEADER_V28,
        }
    }
}

/// Decode the entries for `wanted` app IDs from raw appinfo.vdf bytes.
///
/// Each returned tree is the app's root map, normally a single `appinfo` key.
pub fn read_apps(data: &[u8], wanted: &HashSet<u32>) -> Result<HashMap<u32, KeyValues>, VdfError> {
    let mut reader = ByteReader::new(data);
    let version = AppInfoVersion::from_magic(reader.u32()?)?;
    let _universe = reader.u32()?;

    let string_table = match version {
        AppInfoVersion::V29 => {
            let offset = reader.i64()?;
            let offset = usize::try_from(offset).map_err(|_| VdfError::UnexpectedEof(0))?;
            read_string_table(data, offset)?
        }
        _ => Vec::new(),
    };
    let keys = match version {
        AppInfoVersion::V29 => KeyMode::StringTable(&string_table),
        _ => KeyMode::Inline,
    };

    let mut apps = HashMap::new();
    loop {
        let app_id = reader.u32()?;
        if app_id == 0 {
            break;
        }
        let size = reader.u32()? as usize;
        let entry = reader.take(size)?;
        if !wanted.contains(&app_id) {
            continue;
        }
        let header = version.entry_header_len();
        let blob = entry
            .get(header..)
            .ok_or(VdfError::UnexpectedEof(reader.position()))?;
        apps.insert(app_id, binary::decode_with(blob, keys)?);
        if apps.len() == wanted.len() {
            break;
        }
    }
    Ok(apps)
}

fn read_string_table(data: &[u8], offset: usize) -> Result<Vec<String>, VdfError> {
    let table = data.get(offset..).ok_or(VdfError::UnexpectedEof(offset))?;
    let mut reader = ByteReader::new(table);
    let count = reader.u32()?;
    (0..count).map(|_| reader.cstring()).collect()
}

/// Read `path` and decode the entries for `wanted` app IDs.
pub fn load_apps(path: &Path, wanted: &HashSet<u32>) -> Result<HashMap<u32, KeyValues>, VdfError> {
    let data = std::fs::read(path)?;
    read_apps(&data, wanted)
}

#[cfg(test)]
#[path = "tests/appinfo_tests.rs"]
mod tests;
