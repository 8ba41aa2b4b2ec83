//! Mutation driver.

use crate::buffer::TextBuffer;
use crate::instruction::EditInstruction;
use crate::shift::shift;

/// Shift `instructions` (consolidated, original coordinates) and apply them in order.
///
/// Application is best-effort: an instruction the buffer rejects (it changed underneath, a stale
/// position) is logged and skipped, and the remaining instructions still run. Returns the
/// shifted instructions.
pub fn apply_instructions<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    instructions: &[EditInstruction],
) -> Vec<EditInstruction> {
    let shifted = shift(instructions);
    for inst in &shifted {
        if let Err(err) = buffer.set_text(inst.begin, inst.end, &inst.new_lines) {
            tracing::warn!(
                %err,
                begin = %inst.begin,
                end = %inst.end,
                primary = inst.primary,
                "failed to apply edit instruction"
            );
        }
    }
    shifted
}
