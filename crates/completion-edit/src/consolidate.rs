//! Conflict resolution: the primary instruction always wins.

use crate::instruction::EditInstruction;
use crate::position::Position;

/// Remove overlapping instructions, yielding a position-ordered, conflict-free sequence.
///
/// Instructions are swept in `(begin, end)` order against a pivot (the end of the last kept
/// instruction):
/// - an instruction starting at or after the pivot is kept;
/// - an overlapping primary evicts every kept instruction whose end lies past its begin, then is
///   kept;
/// - an overlapping secondary is dropped.
///
/// Ranges are half-open, so an insertion exactly at another instruction's end does not conflict.
pub fn consolidate(mut instructions: Vec<EditInstruction>) -> Vec<EditInstruction> {
    instructions.sort_by(|a, b| a.begin.cmp(&b.begin).then_with(|| a.end.cmp(&b.end)));

    let mut pivot = Position::default();
    let mut stack: Vec<EditInstruction> = Vec::with_capacity(instructions.len());

    for inst in instructions {
        if inst.begin >= pivot {
            pivot = inst.end;
            stack.push(inst);
        } else if inst.primary {
            while stack.last().is_some_and(|kept| kept.end > inst.begin) {
                if let Some(evicted) = stack.pop() {
                    tracing::debug!(begin = %evicted.begin, end = %evicted.end, "secondary edit evicted by primary");
                }
            }
            pivot = inst.end;
            stack.push(inst);
        } else {
            tracing::debug!(begin = %inst.begin, end = %inst.end, "overlapping secondary edit dropped");
        }
    }

    stack
}
