//! Binary KeyValues decoder.
//!
//! Used for `userdata/<user>/config/shortcuts.vdf` and for the per-app
//! blobs inside `appcache/appinfo.vdf`. Each entry is a type byte, a
//! key, and a payload; a map is terminated by an end byte.
//!
//! | Type | Payload                         |
//! |------|---------------------------------|
//! | 0x00 | nested map                      |
//! | 0x01 | NUL-terminated UTF-8 string     |
//! | 0x02 | i32 (LE)                        |
//! | 0x03 | f32 (LE)                        |
//! | 0x04 | u32 pointer (LE)                |
//! | 0x05 | NUL-terminated UTF-16LE string  |
//! | 0x06 | u32 color (LE)                  |
//! | 0x07 | u64 (LE)                        |
//! | 0x08 | end of map                      |
//! | 0x0A | i64 (LE)                        |
//! | 0x0B | end of map (alternate)          |

use crate::error::VdfError;
use crate::keyvalues::{KeyValues, MAX_DEPTH, Value};

const TYPE_MAP: u8 = 0x00;
const TYPE_STRING: u8 = 0x01;
const TYPE_INT32: u8 = 0x02;
const TYPE_FLOAT32: u8 = 0x03;
const TYPE_POINTER: u8 = 0x04;
const TYPE_WIDESTRING: u8 = 0x05;
const TYPE_COLOR: u8 = 0x06;
const TYPE_UINT64: u8 = 0x07;
const TYPE_END: u8 = 0x08;
const TYPE_INT64: u8 = 0x0A;
const TYPE_END_ALT: u8 = 0x0B;

/// How map keys are stored.
#[derive(Debug, Clone, Copy)]
pub enum KeyMode<'a> {
    /// NUL-terminated string in front of each value (shortcuts.vdf, appinfo v28).
    Inline,
    /// u32 index into a shared string table (appinfo v29).
    StringTable(&'a [String]),
}

/// A little-endian cursor over a byte slice.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], VdfError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(VdfError::UnexpectedEof(self.pos))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], VdfError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, VdfError> {
        Ok(self.array::<1>()?[0])
    }

    pub(crate) fn u32(&mut self) -> Result<u32, VdfError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    pub(crate) fn i32(&mut self) -> Result<i32, VdfError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    pub(crate) fn u64(&mut self) -> Result<u64, VdfError> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    pub(crate) fn i64(&mut self) -> Result<i64, VdfError> {
        Ok(i64::from_le_bytes(self.array()?))
    }

    fn f32(&mut self) -> Result<f32, VdfError> {
        Ok(f32::from_le_bytes(self.array()?))
    }

    pub(crate) fn cstring(&mut self) -> Result<String, VdfError> {
        let rest = &self.data[self.pos.min(self.data.len())..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(VdfError::UnexpectedEof(self.data.len()))?;
        let s = String::from_utf8_lossy(&rest[..len]).into_owned();
        self.pos += len + 1;
        Ok(s)
    }

    fn wide_cstring(&mut self) -> Result<String, VdfError> {
        let mut units = Vec::new();
        loop {
            let unit = u16::from_le_bytes(self.array()?);
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        Ok(String::from_utf16_lossy(&units))
    }
}

/// Decode a complete binary KeyValues document.
///
/// The top level is read until an end byte or the end of input, whichever
/// comes first; Steam writes a trailing end byte after the root map.
pub fn decode(data: &[u8]) -> Result<KeyValues, VdfError> {
    decode_with(data, KeyMode::Inline)
}

/// Decode with an explicit key encoding.
pub fn decode_with(data: &[u8], keys: KeyMode<'_>) -> Result<KeyValues, VdfError> {
    let mut reader = ByteReader::new(data);
    read_map(&mut reader, keys, 0)
}

fn read_key(reader: &mut ByteReader<'_>, keys: KeyMode<'_>) -> Result<String, VdfError> {
    match keys {
        KeyMode::Inline => reader.cstring(),
        KeyMode::StringTable(table) => {
            let index = reader.u32()?;
            table
                .get(index as usize)
                .cloned()
                .ok_or(VdfError::StringIndex(index))
        }
    }
}

/// At `depth` 0 the end of input also ends the map.
fn read_map(
    reader: &mut ByteReader<'_>,
    keys: KeyMode<'_>,
    depth: usize,
) -> Result<KeyValues, VdfError> {
    if depth > MAX_DEPTH {
        return Err(VdfError::TooDeep(MAX_DEPTH));
    }
    let top_level = depth == 0;
    let mut map = KeyValues::new();
    loop {
        if top_level && reader.is_empty() {
            return Ok(map);
        }
        let kind = reader.u8()?;
        if kind == TYPE_END || kind == TYPE_END_ALT {
            return Ok(map);
        }
        let key = read_key(reader, keys)?;
        let value = match kind {
            TYPE_MAP => Value::Map(read_map(reader, keys, depth + 1)?),
            TYPE_STRING => Value::String(reader.cstring()?),
            TYPE_INT32 => Value::Int32(reader.i32()?),
            TYPE_FLOAT32 => Value::Float32(reader.f32()?),
            TYPE_POINTER => Value::Pointer(reader.u32()?),
            TYPE_WIDESTRING => Value::String(reader.wide_cstring()?),
            TYPE_COLOR => Value::Color(reader.u32()?),
            TYPE_UINT64 => Value::UInt64(reader.u64()?),
            TYPE_INT64 => Value::Int64(reader.i64()?),
            other => return Err(VdfError::UnknownType(other)),
        };
        map.insert(key, value);
    }
}

#[cfg(test)]
#[path = "tests/binary_tests.rs"]
mod tests;
