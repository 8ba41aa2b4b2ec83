//! Final cursor resolution.

use crate::error::EditError;
use crate::instruction::EditInstruction;
use crate::position::Position;
use crate::shift::ShiftState;

/// Resolve where the cursor lands after `instructions` (consolidated, not shifted) are applied.
///
/// Row deltas accumulate up to and including the primary instruction. The primary's column is
/// measured in snapshot coordinates; when the cursor ends on the primary's first row, the column
/// also moves with whatever the earlier instructions did to that row. Instructions after the
/// primary cannot move the cursor.
///
/// A batch without a primary column is a normalization bug: this trips a debug assertion and
/// returns [`EditError::MissingPrimary`] rather than guessing a cursor.
pub fn resolve_cursor(
    cursor: Position,
    instructions: &[EditInstruction],
) -> Result<Position, EditError> {
    let mut row = cursor.row as isize;
    let mut state = ShiftState::default();

    for inst in instructions {
        if !inst.primary {
            row += inst.cursor_yoffset;
            state = state.advance(inst);
            continue;
        }

        debug_assert!(
            inst.cursor_xpos.is_some(),
            "primary instruction without cursor column"
        );
        let col = inst.cursor_xpos.ok_or(EditError::MissingPrimary)? as isize;
        // Row of the cursor in snapshot coordinates.
        let own_row = cursor.row as isize + inst.cursor_yoffset;
        let col = if own_row == inst.begin.row as isize {
            col + state.col_shift(inst.begin.row)
        } else {
            col
        };
        row += inst.cursor_yoffset;
        return Ok(Position::new(row.max(0) as usize, col.max(0) as usize));
    }

    debug_assert!(false, "no primary instruction in batch");
    Err(EditError::MissingPrimary)
}
