//! Buffer positions and range encodings.

use crate::error::EditError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A (row, column) pair in a buffer.
///
/// `col` is a byte offset into the UTF-8 encoding of the row unless a range states otherwise via
/// its [`Encoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// The unit a range's columns are measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8 bytes (the buffer's native unit).
    Utf8,
    /// UTF-16 code units (the LSP default).
    Utf16,
}

impl Encoding {
    /// The LSP `PositionEncodingKind` spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
        }
    }
}

impl FromStr for Encoding {
    type Err = EditError;

    /// Accepts `utf-8`/`utf8` and `utf-16`/`utf16` (case-insensitive).
    ///
    /// Any other tag is a configuration error: columns measured in an unknown unit cannot be
    /// mapped onto buffer bytes.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16" | "utf16" => Ok(Self::Utf16),
            _ => Err(EditError::UnknownEncoding(tag.to_string())),
        }
    }
}
