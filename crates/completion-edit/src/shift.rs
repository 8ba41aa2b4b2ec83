//! Coordinate shifting for sequential application.
//!
//! Consolidated instructions are expressed in the original snapshot's coordinates. Applying them
//! one after another changes the buffer's shape, so each instruction is re-targeted by the row
//! and column changes of the instructions applied before it.

use crate::instruction::EditInstruction;
use crate::position::Position;
use std::collections::HashMap;

/// Accumulated shape change of the instructions applied so far.
///
/// `cols` maps an *original* row to the column shift of text that follows the last instruction
/// ending on that row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftState {
    /// Rows added (negative: removed) so far.
    pub rows: isize,
    /// Column shift per original row.
    pub cols: HashMap<usize, isize>,
}

impl ShiftState {
    /// Column shift of text on original `row`, past the last instruction ending there.
    pub fn col_shift(&self, row: usize) -> isize {
        self.cols.get(&row).copied().unwrap_or(0)
    }

    fn map(&self, pos: Position) -> Position {
        Position::new(
            pos.row.saturating_add_signed(self.rows),
            pos.col.saturating_add_signed(self.col_shift(pos.row)),
        )
    }

    /// Express `inst` in the coordinates of the buffer after everything accumulated so far.
    pub fn retarget(&self, inst: &EditInstruction) -> EditInstruction {
        EditInstruction {
            begin: self.map(inst.begin),
            end: self.map(inst.end),
            ..inst.clone()
        }
    }

    /// Fold the shape change of applying `inst` (given in original coordinates) into the state.
    pub fn advance(mut self, inst: &EditInstruction) -> Self {
        let last_len = inst.last_line_len() as isize;
        let end_col = inst.end.col as isize;
        // Text after `end` on its row follows the last inserted line.
        let shift = if inst.new_lines.len() > 1 {
            last_len - end_col
        } else {
            let begin_col = inst.begin.col as isize + self.col_shift(inst.begin.row);
            begin_col + last_len - end_col
        };
        self.rows += inst.row_delta();
        self.cols.insert(inst.end.row, shift);
        self
    }
}

/// Re-target every instruction for plain sequential application.
pub fn shift(instructions: &[EditInstruction]) -> Vec<EditInstruction> {
    instructions
        .iter()
        .fold(
            (ShiftState::default(), Vec::with_capacity(instructions.len())),
            |(state, mut out), inst| {
                out.push(state.retarget(inst));
                (state.advance(inst), out)
            },
        )
        .1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inst(begin: (usize, usize), end: (usize, usize), text: &str) -> EditInstruction {
        EditInstruction {
            primary: false,
            begin: begin.into(),
            end: end.into(),
            cursor_yoffset: 0,
            cursor_xpos: None,
            new_lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_single_insertion_shifts_columns_by_its_length() {
        let state = ShiftState::default().advance(&inst((0, 3), (0, 3), "héllo"));
        assert_eq!(state.rows, 0);
        assert_eq!(state.cols.get(&0), Some(&6));
    }

    #[test]
    fn test_same_row_shifts_accumulate() {
        let shifted = shift(&[
            inst((0, 0), (0, 2), "abc"),
            inst((0, 4), (0, 5), "XYZ"),
            inst((0, 7), (0, 7), "!"),
        ]);
        assert_eq!(shifted[1].begin, Position::new(0, 5));
        assert_eq!(shifted[1].end, Position::new(0, 6));
        assert_eq!(shifted[2].begin, Position::new(0, 10));
    }

    #[test]
    fn test_multi_line_replacement_on_one_row() {
        // "abcdefg": "cd" becomes "A\nBC", so "efg" moves to row 1 after "BC".
        let shifted = shift(&[inst((0, 2), (0, 4), "A\nBC"), inst((0, 6), (0, 7), "")]);
        assert_eq!(shifted[1].begin, Position::new(1, 4));
        assert_eq!(shifted[1].end, Position::new(1, 5));
    }

    #[test]
    fn test_line_insertions_shift_later_rows() {
        let shifted = shift(&[
            inst((0, 0), (0, 0), "use a;\nuse b;\n"),
            inst((4, 2), (4, 3), "x"),
        ]);
        assert_eq!(shifted[0].begin, Position::new(0, 0));
        assert_eq!(shifted[1].begin, Position::new(6, 2));
        assert_eq!(shifted[1].end, Position::new(6, 3));
    }

    #[test]
    fn test_row_joining_replacement() {
        // Rows 1..=2 collapse into one; text after (2, 4) follows "Z" on row 1.
        let shifted = shift(&[inst((1, 3), (2, 4), "Z"), inst((2, 6), (3, 0), "")]);
        assert_eq!(shifted[1].begin, Position::new(1, 6));
        assert_eq!(shifted[1].end, Position::new(2, 0));
    }
}
