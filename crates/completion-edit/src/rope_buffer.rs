//! In-memory [`TextBuffer`] backed by a rope.
//!
//! Used by hosts without their own buffer and by the test suites. Text is stored with LF line
//! separators; CRLF input is normalized on load.

use crate::buffer::{BufferError, BufferId, MarkerNamespace, MarkerRange, TextBuffer};
use crate::position::Position;
use ropey::Rope;
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// A rope-backed buffer with a cursor and namespaced markers.
#[derive(Debug, Clone)]
pub struct RopeBuffer {
    id: BufferId,
    rope: Rope,
    cursor: Position,
    markers: BTreeMap<MarkerNamespace, Vec<MarkerRange>>,
}

impl RopeBuffer {
    /// Create a buffer holding `text`, with the cursor at the origin.
    pub fn new(text: &str) -> Self {
        let text = if text.contains('\r') {
            text.replace("\r\n", "\n")
        } else {
            text.to_string()
        };
        Self {
            id: NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed),
            rope: Rope::from_str(&text),
            cursor: Position::default(),
            markers: BTreeMap::new(),
        }
    }

    /// Full buffer text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of `row` without its line separator.
    pub fn line(&self, row: usize) -> Option<String> {
        if row >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(row).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    fn line_len(&self, row: usize) -> usize {
        let line = self.rope.line(row);
        let len = line.len_bytes();
        if len > 0 && line.byte(len - 1) == b'\n' {
            len - 1
        } else {
            len
        }
    }

    fn check_row(&self, row: usize) -> Result<(), BufferError> {
        let line_count = self.rope.len_lines();
        if row >= line_count {
            return Err(BufferError::RowOutOfRange { row, line_count });
        }
        Ok(())
    }

    /// Char index of a byte position, validating row, column and character boundary.
    fn char_index(&self, pos: Position) -> Result<usize, BufferError> {
        self.check_row(pos.row)?;
        let len = self.line_len(pos.row);
        if pos.col > len {
            return Err(BufferError::ColumnOutOfRange {
                row: pos.row,
                col: pos.col,
                len,
            });
        }
        let byte = self.rope.line_to_byte(pos.row) + pos.col;
        let idx = self.rope.byte_to_char(byte);
        if self.rope.char_to_byte(idx) != byte {
            return Err(BufferError::NotCharBoundary {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(idx)
    }

    fn adjust_markers(&mut self, begin: Position, end: Position, new_end: Position) {
        let remap = |pos: Position, right_gravity: bool| -> Position {
            if pos < begin || (pos == begin && begin == end && !right_gravity) {
                pos
            } else if pos < end {
                begin
            } else if pos.row == end.row {
                Position::new(new_end.row, new_end.col + (pos.col - end.col))
            } else {
                let row = pos.row as isize + (new_end.row as isize - end.row as isize);
                Position::new(row.max(0) as usize, pos.col)
            }
        };
        for marker in self.markers.values_mut().flatten() {
            marker.begin = remap(marker.begin, true);
            marker.end = remap(marker.end, false).max(marker.begin);
        }
    }
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextBuffer for RopeBuffer {
    fn id(&self) -> BufferId {
        self.id
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn get_lines(&self, rows: Range<usize>) -> Result<Vec<String>, BufferError> {
        let hi = rows.end.min(self.rope.len_lines());
        Ok((rows.start..hi).filter_map(|row| self.line(row)).collect())
    }

    fn set_text(
        &mut self,
        begin: Position,
        end: Position,
        lines: &[String],
    ) -> Result<(), BufferError> {
        if end < begin {
            return Err(BufferError::InvertedRange { begin, end });
        }
        let start = self.char_index(begin)?;
        let stop = self.char_index(end)?;

        self.rope.remove(start..stop);
        self.rope.insert(start, &lines.join("\n"));

        let new_end = match lines {
            [] => begin,
            [only] => Position::new(begin.row, begin.col + only.len()),
            [.., last] => Position::new(begin.row + lines.len() - 1, last.len()),
        };
        self.adjust_markers(begin, end, new_end);
        Ok(())
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, position: Position) -> Result<(), BufferError> {
        self.char_index(position)?;
        self.cursor = position;
        Ok(())
    }

    fn set_markers(&mut self, namespace: MarkerNamespace, markers: &[MarkerRange]) {
        let mut markers = markers.to_vec();
        markers.sort_by_key(|m| m.id);
        self.markers.insert(namespace, markers);
    }

    fn markers(&self, namespace: MarkerNamespace) -> Vec<MarkerRange> {
        self.markers.get(&namespace).cloned().unwrap_or_default()
    }

    fn clear_markers(&mut self, namespace: MarkerNamespace) {
        self.markers.remove(&namespace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_set_text_replaces_byte_range() {
        let mut buf = RopeBuffer::new("日本語\nabc");
        buf.set_text(Position::new(0, 3), Position::new(1, 1), &lines("X\nY"))
            .unwrap();
        assert_eq!(buf.text(), "日X\nYbc");
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_set_text_rejects_split_characters() {
        let mut buf = RopeBuffer::new("日本語");
        let err = buf
            .set_text(Position::new(0, 1), Position::new(0, 3), &lines(""))
            .unwrap_err();
        assert_eq!(err, BufferError::NotCharBoundary { row: 0, col: 1 });
        let err = buf
            .set_text(Position::new(1, 0), Position::new(1, 0), &lines("x"))
            .unwrap_err();
        assert!(matches!(err, BufferError::RowOutOfRange { row: 1, .. }));
    }

    #[test]
    fn test_get_lines_clamps_window() {
        let buf = RopeBuffer::new("a\r\nb\nc");
        assert_eq!(buf.get_lines(1..10).unwrap(), vec!["b", "c"]);
        assert_eq!(buf.get_lines(0..1).unwrap(), vec!["a"]);
    }

    #[test]
    fn test_markers_follow_insertions() {
        let ns = MarkerNamespace(7);
        let mut buf = RopeBuffer::new("foo bar");
        buf.set_markers(
            ns,
            &[
                MarkerRange {
                    id: 1,
                    begin: Position::new(0, 0),
                    end: Position::new(0, 3),
                },
                MarkerRange {
                    id: 2,
                    begin: Position::new(0, 3),
                    end: Position::new(0, 7),
                },
            ],
        );
        buf.set_text(Position::new(0, 3), Position::new(0, 3), &lines("ly"))
            .unwrap();
        let markers = buf.markers(ns);
        assert_eq!(markers[0].end, Position::new(0, 3));
        assert_eq!(markers[1].begin, Position::new(0, 5));
        assert_eq!(markers[1].end, Position::new(0, 9));

        buf.set_text(Position::new(0, 0), Position::new(0, 0), &lines("\n"))
            .unwrap();
        assert_eq!(buf.markers(ns)[1].begin, Position::new(1, 5));

        buf.clear_markers(ns);
        assert!(buf.markers(ns).is_empty());
    }
}
