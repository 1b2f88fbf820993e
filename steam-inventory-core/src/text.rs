//! Text KeyValues (VDF) parser.
//!
//! Handles the subset of the format Steam writes to `libraryfolders.vdf`,
//! `config.vdf`, `appmanifest_*.acf` and `compatibilitytool.vdf`:
//! quoted and bare tokens, `{ }` blocks, `//` line comments, backslash
//! escapes inside quotes, and trailing `[$PLATFORM]` conditionals (which
//! are skipped, not evaluated).

use std::path::Path;

use crate::error::VdfError;
use crate::keyvalues::{KeyValues, MAX_DEPTH, Value};

#[derive(Debug, PartialEq)]
enum Token {
    Str(String),
    Open,
    Close,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn starts_comment(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.peek() == Some(&'/')
    }

    /// Skip whitespace, comments and `[$...]` conditionals.
    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '/' && self.starts_comment() {
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else if c == '[' {
                while let Some(c) = self.bump() {
                    if c == ']' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, VdfError> {
        self.skip_trivia();
        let Some(c) = self.bump() else {
            return Ok(None);
        };
        match c {
            '{' => Ok(Some(Token::Open)),
            '}' => Ok(Some(Token::Close)),
            '"' => self.quoted().map(|s| Some(Token::Str(s))),
            other => Ok(Some(Token::Str(self.bare(other)))),
        }
    }

    fn quoted(&mut self) -> Result<String, VdfError> {
        let start = self.line;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('\\') => out.push('\\'),
                    Some('"') => out.push('"'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => break,
                },
                Some(c) => out.push(c),
                None => break,
            }
        }
        Err(VdfError::parse(start, "unterminated quoted string"))
    }

    fn bare(&mut self, first: char) -> String {
        let mut out = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '{' | '}' | '"') {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }
}

/// Parse text VDF into a [`KeyValues`] tree.
pub fn parse(input: &str) -> Result<KeyValues, VdfError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lexer = Lexer::new(input);
    let root = parse_block(&mut lexer, 0)?;
    Ok(root)
}

/// `depth` 0 is the document root, which ends at end of input instead of `}`.
fn parse_block(lexer: &mut Lexer<'_>, depth: usize) -> Result<KeyValues, VdfError> {
    if depth > MAX_DEPTH {
        return Err(VdfError::TooDeep(MAX_DEPTH));
    }
    let nested = depth > 0;
    let mut block = KeyValues::new();
    loop {
        let key = match lexer.next_token()? {
            Some(Token::Str(key)) => key,
            Some(Token::Close) if nested => return Ok(block),
            Some(Token::Close) => return Err(VdfError::parse(lexer.line, "unexpected '}'")),
            Some(Token::Open) => {
                return Err(VdfError::parse(lexer.line, "expected key, found '{'"));
            }
            None if nested => return Err(VdfError::parse(lexer.line, "unclosed block")),
            None => return Ok(block),
        };
        match lexer.next_token()? {
            Some(Token::Str(value)) => block.merge_insert(key, Value::String(value)),
            Some(Token::Open) => {
                let child = parse_block(lexer, depth + 1)?;
                block.merge_insert(key, Value::Map(child));
            }
            Some(Token::Close) | None => {
                return Err(VdfError::parse(
                    lexer.line,
                    format!("key \"{key}\" has no value"),
                ));
            }
        }
    }
}

/// Read and parse a text VDF file.
pub fn load(path: &Path) -> Result<KeyValues, VdfError> {
    let bytes = std::fs::read(path)?;
    parse(&String::from_utf8_lossy(&bytes))
}

/// Read a text VDF file, returning an empty tree on any failure.
///
/// Steam rewrites these files while running and users hand-edit them, so
/// callers treat an unreadable file the same as an empty one.
pub fn safe_load(path: &Path) -> KeyValues {
    match load(path) {
        Ok(kv) => kv,
        Err(e) => {
            log::debug!("Could not load {}: {e}", path.display());
            KeyValues::new()
        }
    }
}

#[cfg(test)]
#[path = "tests/text_tests.rs"]
mod tests;
