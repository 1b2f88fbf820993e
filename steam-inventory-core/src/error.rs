use thiserror::Error;

/// Errors that can occur while reading KeyValues (VDF) data.
#[derive(Debug, Error)]
pub enum VdfError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text VDF could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Binary data ended in the middle of a value
    #[error("Unexpected end of data at offset {0}")]
    UnexpectedEof(usize),

    /// Binary data contains a type byte we don't understand
    #[error("Unknown value type 0x{0:02x}")]
    UnknownType(u8),

    /// appinfo.vdf header magic doesn't match a supported version
    #[error("Unsupported appinfo magic 0x{0:08x}")]
    InvalidMagic(u32),

    /// A v29 key index points past the end of the string table
    #[error("String table index {0} out of range")]
    StringIndex(u32),

    /// Maps nested deeper than any real Steam file
    #[error("Nesting deeper than {0} levels")]
    TooDeep(usize),
}

impl VdfError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
