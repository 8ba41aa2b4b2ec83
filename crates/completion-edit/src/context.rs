//! Editor state captured when a completion request is issued.

use crate::buffer::BufferId;
use crate::position::Position;
use completion_edit_lang::WordChars;

/// Opaque id of a buffer change; two contexts with the same id saw the same buffer content.
pub type ChangeId = u64;

/// Cursor context captured from the editor.
///
/// `position.col` is a UTF-8 byte column into `line`. Columns that do not fall on a character
/// boundary are clamped back to the previous boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// The buffer this context was captured from.
    pub buf_id: BufferId,
    /// Change id of the buffer at capture time.
    pub change_id: ChangeId,
    /// Cursor position.
    pub position: Position,
    /// Full text of the cursor's row.
    pub line: String,
    /// Total number of rows in the buffer.
    pub line_count: usize,
    /// Line separator used by the buffer.
    pub linefeed: String,
    /// Whether completion was requested explicitly by the user.
    pub manual: bool,
}

impl Context {
    /// Capture a context with `\n` line feeds and automatic invocation.
    pub fn new(
        buf_id: BufferId,
        change_id: ChangeId,
        position: Position,
        line: impl Into<String>,
        line_count: usize,
    ) -> Self {
        let line = line.into();
        let mut col = position.col.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        Self {
            buf_id,
            change_id,
            position: Position::new(position.row, col),
            line,
            line_count,
            linefeed: "\n".to_string(),
            manual: false,
        }
    }

    /// Use `linefeed` as the line separator.
    pub fn with_linefeed(mut self, linefeed: impl Into<String>) -> Self {
        self.linefeed = linefeed.into();
        self
    }

    /// Mark the request as manual (or automatic).
    pub fn with_manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    /// Text on the cursor row before the cursor.
    pub fn line_before(&self) -> &str {
        &self.line[..self.position.col]
    }

    /// Text on the cursor row after the cursor.
    pub fn line_after(&self) -> &str {
        &self.line[self.position.col..]
    }

    /// The word token ending at the cursor.
    pub fn words_before(&self, chars: &WordChars) -> &str {
        chars.trailing_word(self.line_before())
    }

    /// The word token starting at the cursor.
    pub fn words_after(&self, chars: &WordChars) -> &str {
        chars.leading_word(self.line_after())
    }

    /// The run of non-whitespace characters ending at the cursor.
    pub fn syms_before(&self) -> &str {
        let before = self.line_before();
        let start = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| !c.is_whitespace())
            .last()
            .map_or(before.len(), |(idx, _)| idx);
        &before[start..]
    }
}
