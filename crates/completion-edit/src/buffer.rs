//! The editor-buffer collaborator.
//!
//! The engine reads and mutates the host's buffer only through [`TextBuffer`]. All columns are
//! UTF-8 byte offsets, all ranges half-open.

use crate::position::Position;
use std::ops::Range;
use thiserror::Error;

/// Identifies a host buffer.
pub type BufferId = u64;

/// A namespace for marker ranges; clearing it removes every marker it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerNamespace(pub u64);

/// A marker range tracked by the buffer across edits.
///
/// Marker gravity follows the usual extmark convention: on an insertion exactly at the marker's
/// position, `begin` moves right with the inserted text and `end` stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRange {
    /// Marker id, unique within its namespace.
    pub id: usize,
    /// Start of the range.
    pub begin: Position,
    /// End of the range.
    pub end: Position,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by a [`TextBuffer`].
pub enum BufferError {
    #[error("row {row} out of range (buffer has {line_count} lines)")]
    /// A row index past the end of the buffer.
    RowOutOfRange {
        /// Offending row.
        row: usize,
        /// Current line count.
        line_count: usize,
    },

    #[error("column {col} out of range on row {row} (line is {len} bytes)")]
    /// A column past the end of its line.
    ColumnOutOfRange {
        /// Row of the position.
        row: usize,
        /// Offending column.
        col: usize,
        /// Byte length of the line.
        len: usize,
    },

    #[error("column {col} on row {row} is not a character boundary")]
    /// A column that splits a multi-byte character.
    NotCharBoundary {
        /// Row of the position.
        row: usize,
        /// Offending column.
        col: usize,
    },

    #[error("range end {end} precedes begin {begin}")]
    /// An inverted range.
    InvertedRange {
        /// Range start.
        begin: Position,
        /// Range end.
        end: Position,
    },
}

/// Read/write access to the host's text buffer.
pub trait TextBuffer {
    /// Id of this buffer.
    fn id(&self) -> BufferId;

    /// Current number of rows.
    fn line_count(&self) -> usize;

    /// Read the rows in `rows` (clamped to the buffer), without line separators.
    fn get_lines(&self, rows: Range<usize>) -> Result<Vec<String>, BufferError>;

    /// Replace `[begin, end)` with `lines` joined by the buffer's line separator.
    fn set_text(
        &mut self,
        begin: Position,
        end: Position,
        lines: &[String],
    ) -> Result<(), BufferError>;

    /// Current cursor position.
    fn cursor(&self) -> Position;

    /// Move the cursor.
    fn set_cursor(&mut self, position: Position) -> Result<(), BufferError>;

    /// Replace the markers of `namespace` with `markers`.
    fn set_markers(&mut self, namespace: MarkerNamespace, markers: &[MarkerRange]);

    /// Markers of `namespace`, ordered by id.
    fn markers(&self, namespace: MarkerNamespace) -> Vec<MarkerRange>;

    /// Remove every marker of `namespace`.
    fn clear_markers(&mut self, namespace: MarkerNamespace);
}
