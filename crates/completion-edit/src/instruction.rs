//! The uniform unit consumed by consolidation, shifting and application.

use crate::position::Position;

/// A normalized buffer mutation.
///
/// `begin`/`end` are UTF-8 byte positions in the coordinate space of the snapshot the batch was
/// normalized against (or, after [`shift`](crate::shift()), of the buffer at the time the
/// instruction is applied). Instructions are never mutated; transformations build new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditInstruction {
    /// Whether this is the accepted completion's own edit.
    pub primary: bool,
    /// Start of the replaced range.
    pub begin: Position,
    /// End of the replaced range (exclusive).
    pub end: Position,
    /// Row delta this instruction contributes to the cursor.
    pub cursor_yoffset: isize,
    /// Cursor byte column after this instruction; `None` for secondaries.
    pub cursor_xpos: Option<usize>,
    /// Replacement text split on line feeds (never empty).
    pub new_lines: Vec<String>,
}

impl EditInstruction {
    /// Net change in the number of buffer rows once applied.
    pub fn row_delta(&self) -> isize {
        let inserted = self.new_lines.len().saturating_sub(1) as isize;
        let removed = (self.end.row - self.begin.row) as isize;
        inserted - removed
    }

    /// Byte length of the last replacement line.
    pub fn last_line_len(&self) -> usize {
        self.new_lines.last().map_or(0, String::len)
    }

    /// Position right after the inserted text, once applied at `begin`.
    pub fn inserted_end(&self) -> Position {
        match self.new_lines.as_slice() {
            [] => self.begin,
            [only] => Position::new(self.begin.row, self.begin.col + only.len()),
            [.., last] => Position::new(self.begin.row + self.new_lines.len() - 1, last.len()),
        }
    }
}
